//! Error handling for the Dash Builder CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;
use std::fmt;

use owo_colors::OwoColorize;
use thiserror::Error;

use dash_builder_core::error::DashBuilderError;

use crate::config::{AppConfig, ConfigKeyError};

// Re-export so callers only need `use crate::error::*`.
pub use dash_builder_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// Wrapped so the CLI can attach suggestions drawn from the core error's
    /// category without touching core internals.
    #[error("{0}")]
    Core(#[from] DashBuilderError),

    // ── System errors ──────────────────────────────────────────────────────
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<ConfigKeyError> for CliError {
    fn from(err: ConfigKeyError) -> Self {
        CliError::ConfigError {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigError { .. } => vec![
                format!(
                    "Check your config file at {}",
                    AppConfig::config_path().display()
                ),
                format!(
                    "Known keys: {}",
                    AppConfig::keys().collect::<Vec<_>>().join(", ")
                ),
                "Use 'dash-builder init --force' to write a fresh default config".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { .. } => vec![
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Conflict => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Render for a terminal: red header, dimmed causes, yellow suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        self.render(verbose, true)
    }

    /// Same layout as [`Self::format_colored`] without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        self.render(verbose, false)
    }

    fn render(&self, verbose: bool, color: bool) -> String {
        let mut out = String::from("\n");
        if color {
            out += &format!("{} {}\n", "\u{2717}".red().bold(), self.to_string().red());
        } else {
            out += &format!("Error: {self}\n");
        }

        if verbose {
            for cause in self.causes() {
                if color {
                    out += &format!("  {} {}\n", "Caused by:".dimmed(), cause.dimmed());
                } else {
                    out += &format!("  Caused by: {cause}\n");
                }
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            if color {
                out += &format!("\n{}\n", "Suggestions:".yellow().bold());
            } else {
                out += "\nSuggestions:\n";
            }
            for suggestion in &suggestions {
                out += &format!("  {suggestion}\n");
            }
        }

        if !verbose {
            let hint = "Use -v / --verbose for more details.";
            if color {
                out += &format!("\n{}\n", hint.dimmed());
            } else {
                out += &format!("\n{hint}\n");
            }
        }
        out
    }

    /// Messages of the `source()` chain, outermost first.
    fn causes(&self) -> Vec<String> {
        let mut causes = Vec::new();
        let mut source = self.source();
        while let Some(err) = source {
            causes.push(err.to_string());
            source = err.source();
        }
        causes
    }

    /// Emit one event at a severity matching the category.
    pub fn log(&self) {
        let category = self.category();
        match category {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(%category, exit_code = self.exit_code(), "{self}")
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(%category, exit_code = self.exit_code(), "{self}")
            }
        }
        for cause in self.causes() {
            tracing::debug!(%cause, "caused by");
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input or an existing file in the way.
    UserError,
    NotFound,
    Configuration,
    /// Internal/system error.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UserError => "user error",
            Self::NotFound => "not found",
            Self::Configuration => "configuration",
            Self::Internal => "internal",
        };
        f.write_str(name)
    }
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
///
/// There is no blanket impl; it would overlap both concrete impls.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, DashBuilderError> {
    /// Core errors already carry their own context; the message is dropped.
    fn with_cli_context<F, S>(self, _f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(CliError::Core)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    use dash_builder_core::application::ApplicationError;
    use dash_builder_core::domain::DomainError;

    fn core(err: ApplicationError) -> CliError {
        CliError::Core(err.into())
    }

    // ── suggestions ───────────────────────────────────────────────────────

    #[test]
    fn not_found_suggestions_list_templates() {
        let err = core(ApplicationError::TemplateNotFound {
            name: "fancy".into(),
            available: vec!["basic".into(), "basic-mantine".into()],
        });
        assert!(
            err.suggestions()
                .iter()
                .any(|s| s == "Available templates: basic, basic-mantine")
        );
    }

    #[test]
    fn conflict_suggests_rename() {
        let err = core(ApplicationError::ArtifactExists {
            path: PathBuf::from("demo/pages/analytics.py"),
        });
        assert!(err.suggestions().iter().any(|s| s.contains("rename")));
        assert_eq!(err.to_string(), "demo/pages/analytics.py already exists");
    }

    #[test]
    fn config_error_lists_known_keys() {
        let err = CliError::from(ConfigKeyError::UnknownKey("defaults.lang".into()));
        assert!(err.suggestions().iter().any(|s| s.contains("defaults.template")));
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn exit_code_user_error() {
        let conflict = core(ApplicationError::ProjectExists {
            path: PathBuf::from("demo/app.py"),
        });
        assert_eq!(conflict.exit_code(), 2);
    }

    #[test]
    fn exit_code_validation_from_domain() {
        let err = CliError::Core(
            DomainError::InvalidName {
                name: "1abc".into(),
                reason: "must start with a letter".into(),
            }
            .into(),
        );
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn exit_code_not_found() {
        let err = core(ApplicationError::TemplateNotFound {
            name: "x".into(),
            available: vec![],
        });
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn exit_code_configuration() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
    }

    #[test]
    fn exit_code_internal() {
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_contains_error_header() {
        let err = core(ApplicationError::ProjectExists {
            path: PathBuf::from("/tmp/x/app.py"),
        });
        let s = err.format_plain(false);
        assert!(s.contains("Error: /tmp/x/app.py already exists"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_shows_cause_and_omits_hint() {
        let err = CliError::IoError {
            message: "writing config".into(),
            source: io::Error::other("disk full"),
        };
        let s = err.format_plain(true);
        assert!(s.contains("Caused by: disk full"));
        assert!(!s.contains("--verbose"));
    }

    // ── IntoCli ───────────────────────────────────────────────────────────

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading config");
        assert!(matches!(cli, Err(CliError::IoError { ref message, .. }) if message == "reading config"));
    }
}
