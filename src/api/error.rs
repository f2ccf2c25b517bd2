//! API error taxonomy
//!
//! One error type flows from the mock handlers, through the fetch wrapper,
//! up to the domain services. Domain errors (`NotFound`, `RoleInUse`,
//! `InvalidCredentials`) are meant to be shown to the user as-is; routing
//! errors indicate a service/handler contract mismatch.

use crate::mock::Domain;
use crate::types::Record;
use reqwest::{Method, StatusCode};

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx answer from a live backend
    #[error("{message}")]
    Request { status: StatusCode, message: String },

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Cannot delete role '{role}': it has {users} active user(s)")]
    RoleInUse { role: String, users: usize },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid request body for {endpoint}: {reason}")]
    InvalidBody { endpoint: String, reason: String },

    #[error("No mock domain serves endpoint: {endpoint}")]
    UnroutableEndpoint { endpoint: String },

    #[error("Unhandled {domain} mock endpoint: {endpoint} with method {method}")]
    UnhandledMockEndpoint {
        domain: Domain,
        endpoint: String,
        method: Method,
    },

    #[error("Invalid API base URL '{url}'")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to create HTTP client")]
    ClientInit(#[source] reqwest::Error),

    /// Network-level failure: the request never produced a response
    #[error("Failed to send request to {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse response from {endpoint}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode request body")]
    Encode(#[source] serde_json::Error),
}

impl ApiError {
    /// Lookup miss for a record type
    pub fn not_found<T: Record>(id: &str) -> Self {
        Self::NotFound {
            resource: T::RESOURCE,
            id: id.to_string(),
        }
    }

    /// True when no mock route matched: a contract mismatch, not a user error
    pub fn is_routing_error(&self) -> bool {
        matches!(
            self,
            Self::UnroutableEndpoint { .. } | Self::UnhandledMockEndpoint { .. }
        )
    }

    /// True for failures the development fallback may recover from
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// HTTP status for errors that carry one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Format an API error for display
/// Security: Keeps transport and routing details out of user-facing text
pub fn format_api_error(error: &ApiError) -> String {
    match error {
        ApiError::Request { status, message } => match status.as_u16() {
            401 => "Authentication failed. Please sign in again.".to_string(),
            403 => "Permission denied.".to_string(),
            429 => "Rate limit exceeded. Please try again later.".to_string(),
            500..=599 => "CloudHaven service temporarily unavailable. Please try again.".to_string(),
            _ => truncate_message(message),
        },
        ApiError::NotFound { .. }
        | ApiError::RoleInUse { .. }
        | ApiError::InvalidCredentials
        | ApiError::InvalidBody { .. } => error.to_string(),
        ApiError::Transport { .. } | ApiError::ClientInit(_) => {
            "Failed to connect to the API. Please check your network connection and try again."
                .to_string()
        }
        ApiError::UnroutableEndpoint { .. }
        | ApiError::UnhandledMockEndpoint { .. }
        | ApiError::InvalidBaseUrl { .. }
        | ApiError::Decode { .. }
        | ApiError::Encode(_) => "Something went wrong. Please try again.".to_string(),
    }
}

fn truncate_message(message: &str) -> String {
    let sanitized = message
        .chars()
        .filter(|c| !c.is_control())
        .take(120)
        .collect::<String>();

    if sanitized.chars().count() < message.chars().count() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}
