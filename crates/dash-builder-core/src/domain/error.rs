// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (carried through reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Input Validation
    // ========================================================================
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Invalid URL path '{path}': {reason}")]
    InvalidUrlPath { path: String, reason: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes the project root: {path}")]
    PathTraversal { path: String },

    // ========================================================================
    // Template Integrity
    // ========================================================================
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Template '{template_id}' has no content")]
    EmptyTemplate { template_id: String },

    #[error("Duplicate path in template: {path}")]
    DuplicatePath { path: String },

    #[error("Template '{template_id}' has no app.py entry file")]
    MissingAppEntry { template_id: String },

    #[error("Missing required field: {field}")]
    MissingRequiredField { field: &'static str },

    // ========================================================================
    // Generated Source Files
    // ========================================================================
    #[error("Cannot edit aggregator file: {reason}")]
    MalformedAggregator { reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidName { name, .. } => vec![
                format!("'{}' cannot be used as a name", name),
                "Names must start with a letter and contain only letters, digits and '_'".into(),
                "Examples: Analytics, SalesChart, user_table".into(),
            ],
            Self::InvalidUrlPath { .. } => vec![
                "URL paths must start with '/'".into(),
                "Quotes, backslashes and control characters are not allowed".into(),
                "Example: --path /analytics".into(),
            ],
            Self::EmptyTemplate { template_id } | Self::MissingAppEntry { template_id } => vec![
                format!("Template '{}' is incomplete", template_id),
                "Every project template needs at least an app.py file".into(),
            ],
            Self::MalformedAggregator { .. } => vec![
                "Check that views/__init__.py contains a single `__all__ = [...]` list".into(),
                "Fix the file by hand, then run the command again".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidName { .. }
            | Self::InvalidUrlPath { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::PathTraversal { .. }
            | Self::MalformedAggregator { .. } => ErrorCategory::Validation,
            Self::InvalidTemplate(_)
            | Self::EmptyTemplate { .. }
            | Self::DuplicatePath { .. }
            | Self::MissingAppEntry { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
