//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No template with the requested name.
    #[error("Template '{name}' not found")]
    TemplateNotFound { name: String, available: Vec<String> },

    /// A template directory could not be loaded.
    #[error("Failed to load template from {path}: {reason}")]
    TemplateLoadFailed { path: PathBuf, reason: String },

    /// Template rendering failed.
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// The project's `app.py` already exists.
    #[error("{path} already exists")]
    ProjectExists { path: PathBuf },

    /// A page or view file already exists.
    #[error("{path} already exists")]
    ArtifactExists { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The external formatter could not run or reported a failure.
    #[error("Formatter '{command}' failed: {reason}")]
    FormatterFailed { command: String, reason: String },

    /// Store access failed (lock poisoned).
    #[error("Template store error")]
    StoreLockError,

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Rollback failed (best-effort cleanup failed).
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { available, .. } => {
                let mut out = Vec::new();
                if !available.is_empty() {
                    out.push(format!("Available templates: {}", available.join(", ")));
                }
                out.push("Run: dash-builder list".into());
                out
            }
            Self::TemplateLoadFailed { path, .. } => vec![
                format!("Check the template directory: {}", path.display()),
                "A template needs an app.py and an optional valid template.toml".into(),
            ],
            Self::ProjectExists { .. } | Self::ArtifactExists { .. } => vec![
                "Please remove or rename this file and try again".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::FormatterFailed { command, .. } => vec![
                format!("Make sure '{}' is installed and on PATH", command),
                "Or disable formatting with --no-format".into(),
            ],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::ProjectExists { .. } | Self::ArtifactExists { .. } => ErrorCategory::Conflict,
            Self::TemplateLoadFailed { .. } => ErrorCategory::Configuration,
            Self::ValidationFailed(_) => ErrorCategory::Validation,
            Self::FilesystemError { .. }
            | Self::RollbackFailed { .. }
            | Self::FormatterFailed { .. }
            | Self::StoreLockError
            | Self::RenderingFailed { .. } => ErrorCategory::Internal,
        }
    }
}
