//! Configuration Management
//!
//! Handles persistent configuration storage for cloudhaven. Values resolve
//! in the order CLI flag, environment variable, config file, default.

use crate::api::{ServeMode, DEFAULT_API_BASE_URL};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Overrides the configured API base URL
pub const ENV_API_URL: &str = "CLOUDHAVEN_API_URL";
/// Overrides the configured serve mode
pub const ENV_MODE: &str = "CLOUDHAVEN_MODE";

/// User configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// API base URL
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// Serve mode
    #[serde(default)]
    pub mode: Option<ServeMode>,
    /// Toast detail level (minimal, detailed, verbose)
    #[serde(default)]
    pub detail_level: Option<String>,
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cloudhaven").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                Self::default()
            },
        }
    }

    /// Decode a config file, falling back to defaults on bad content
    pub fn parse(content: &str) -> Self {
        serde_json::from_str(content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed config file: {}", e);
            Self::default()
        })
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Get effective base URL (CLI > env > config > default)
    pub fn effective_base_url(&self, cli: Option<&str>) -> String {
        self.resolve_base_url(cli, env_var(ENV_API_URL))
    }

    /// Get effective serve mode (CLI > env > config > default)
    pub fn effective_mode(&self, cli: Option<ServeMode>) -> ServeMode {
        self.resolve_mode(cli, env_var(ENV_MODE))
    }

    fn resolve_base_url(&self, cli: Option<&str>, env: Option<String>) -> String {
        cli.map(str::to_string)
            .or(env)
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    fn resolve_mode(&self, cli: Option<ServeMode>, env: Option<String>) -> ServeMode {
        let from_env = env.and_then(|v| match v.parse::<ServeMode>() {
            Ok(mode) => Some(mode),
            Err(e) => {
                tracing::warn!("Ignoring {}: {}", ENV_MODE, e);
                None
            },
        });

        cli.or(from_env).or(self.mode).unwrap_or_default()
    }

    /// Set serve mode and save
    pub fn set_mode(&mut self, mode: ServeMode) -> Result<()> {
        self.mode = Some(mode);
        self.save()
    }

    /// Set base URL and save
    pub fn set_base_url(&mut self, url: &str) -> Result<()> {
        url::Url::parse(url)?;
        self.api_base_url = Some(url.to_string());
        self.save()
    }
}
