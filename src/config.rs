//! Configuration System
//!
//! Layered configuration for context stacks and logging. Files are TOML; the
//! environment overrides files; validated settings are installed
//! process-wide with [`BlameConfig::apply`].

use crate::context::ContextSettings;
use crate::error::BlameError;
use crate::logging::LoggingConfig;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlameConfig {
    /// Context stack settings
    #[serde(default)]
    pub context: ContextSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Context(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Context(msg) => write!(f, "Context: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl BlameConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.context.validate() {
            errors.push(ValidationError::Context(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, then install the context settings for every thread.
    pub fn apply(&self) -> Result<(), BlameError> {
        self.validate().map_err(validation_failed)?;
        self.context.install();
        info!(
            depth_warning = self.context.depth_warning,
            warn_on_overwrite = self.context.warn_on_overwrite,
            "Context settings applied"
        );
        Ok(())
    }
}

fn validation_failed(errors: Vec<ValidationError>) -> BlameError {
    let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    BlameError::ConfigError(format!(
        "Configuration validation failed:\n{}",
        error_msgs.join("\n")
    ))
}

/// Configuration manager for runtime updates
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: Arc<RwLock<BlameConfig>>,
}

impl ConfigManager {
    pub fn new(config: BlameConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// Reload configuration from files and apply it.
    ///
    /// On failure the previous configuration stays in effect.
    pub fn reload(&self, workspace_root: &Path) -> Result<(), BlameError> {
        let new_config = ConfigLoader::load(workspace_root)
            .map_err(|e| BlameError::ConfigError(format!("Failed to load config: {}", e)))?;
        new_config.apply()?;
        *self.config.write() = new_config;
        Ok(())
    }

    /// Get current configuration (read-only)
    pub fn get(&self) -> BlameConfig {
        self.config.read().clone()
    }
}
