//! Notification System
//!
//! Collects the user-visible toasts raised by the API layer (request
//! failures, connection errors) and keeps a bounded history of them.

use std::collections::VecDeque;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Level of detail for notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailLevel {
    /// Minimal: icon + title
    Minimal,
    /// Detailed: icon + title + description
    #[default]
    Detailed,
    /// Verbose: everything, including age
    Verbose,
}

impl DetailLevel {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "minimal" => Self::Minimal,
            "verbose" => Self::Verbose,
            _ => Self::Detailed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Detailed => "detailed",
            Self::Verbose => "verbose",
        }
    }
}

/// Visual weight of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastVariant {
    /// Informational
    #[default]
    Default,
    /// Failure the user should notice
    Destructive,
}

impl ToastVariant {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Default => "ℹ",
            Self::Destructive => "✗",
        }
    }
}

/// A single notification
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
    pub created_at: Instant,
}

impl Notification {
    pub fn new(title: &str, description: &str, variant: ToastVariant) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            variant,
            created_at: Instant::now(),
        }
    }

    pub fn info(title: &str, description: &str) -> Self {
        Self::new(title, description, ToastVariant::Default)
    }

    pub fn destructive(title: &str, description: &str) -> Self {
        Self::new(title, description, ToastVariant::Destructive)
    }

    /// Format age for display
    pub fn age_display(&self) -> String {
        let d = self.created_at.elapsed();
        if d.as_secs() < 1 {
            format!("{}ms", d.as_millis())
        } else if d.as_secs() < 60 {
            format!("{}s", d.as_secs())
        } else {
            format!("{}m{}s", d.as_secs() / 60, d.as_secs() % 60)
        }
    }

    /// Format notification for toast display
    pub fn toast_message(&self, detail_level: DetailLevel) -> String {
        let icon = self.variant.icon();

        match detail_level {
            DetailLevel::Minimal => format!("{} {}", icon, self.title),
            DetailLevel::Detailed => format!("{} {}: {}", icon, self.title, self.description),
            DetailLevel::Verbose => format!(
                "{} {}: {} ({} ago)",
                icon,
                self.title,
                self.description,
                self.age_display()
            ),
        }
    }
}

/// Notification manager
pub struct NotificationManager {
    /// All notifications (recent first)
    pub notifications: VecDeque<Notification>,
    /// Maximum notifications to keep in history
    pub max_history: usize,
    /// Toast display duration
    pub toast_duration: Duration,
    /// Detail level for display
    pub detail_level: DetailLevel,
    last_toast_time: Option<Instant>,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationManager {
    pub fn new() -> Self {
        Self {
            notifications: VecDeque::new(),
            max_history: 50,
            toast_duration: Duration::from_secs(5),
            detail_level: DetailLevel::Detailed,
            last_toast_time: None,
        }
    }

    /// Record a notification and make it the current toast
    pub fn push(&mut self, notification: Notification) -> Uuid {
        let id = notification.id;
        tracing::debug!(
            "toast [{:?}] {}: {}",
            notification.variant,
            notification.title,
            notification.description
        );
        self.notifications.push_front(notification);
        self.last_toast_time = Some(Instant::now());
        self.trim_history();
        id
    }

    /// Get the most recent notification while its toast is still visible
    pub fn current_toast(&self) -> Option<&Notification> {
        let last_time = self.last_toast_time?;
        if last_time.elapsed() > self.toast_duration {
            return None;
        }
        self.notifications.front()
    }

    /// Count of destructive notifications in history
    pub fn error_count(&self) -> usize {
        self.notifications
            .iter()
            .filter(|n| n.variant == ToastVariant::Destructive)
            .count()
    }

    /// Toast lines for every notification, oldest first
    pub fn toast_lines(&self) -> Vec<String> {
        self.notifications
            .iter()
            .rev()
            .map(|n| n.toast_message(self.detail_level))
            .collect()
    }

    fn trim_history(&mut self) {
        while self.notifications.len() > self.max_history {
            self.notifications.pop_back();
        }
    }

    /// Check if there are any notifications to show
    pub fn has_notifications(&self) -> bool {
        !self.notifications.is_empty()
    }

    /// Get count of recent notifications (last 5 minutes)
    pub fn recent_count(&self) -> usize {
        let cutoff = Duration::from_secs(300);
        self.notifications
            .iter()
            .filter(|n| n.created_at.elapsed() < cutoff)
            .count()
    }
}
