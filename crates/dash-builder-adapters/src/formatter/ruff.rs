//! `ruff` formatter adapter.
//!
//! Runs `<cmd> format <path>` followed by `<cmd> check --select I --fix <path>`
//! so that generated imports end up sorted the way the formatter wants them.

use std::path::Path;
use std::process::{Command, Output};

use dash_builder_core::{
    application::{ApplicationError, FormatOutcome, ports::Formatter},
    error::DashBuilderResult,
};
use tracing::{debug, instrument};

pub const DEFAULT_COMMAND: &str = "ruff";

/// Formatter shelling out to `ruff`, or a compatible command.
#[derive(Debug, Clone)]
pub struct RuffFormatter {
    command: String,
}

impl RuffFormatter {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    fn run(&self, args: &[&str], path: &Path) -> DashBuilderResult<()> {
        debug!(command = %self.command, ?args, path = %path.display(), "running formatter");
        let output = Command::new(&self.command)
            .args(args)
            .arg(path)
            .output()
            .map_err(|e| self.failed(format!("could not start: {e}")))?;
        check_status(&output).map_err(|reason| self.failed(reason))
    }

    fn failed(&self, reason: String) -> dash_builder_core::error::DashBuilderError {
        ApplicationError::FormatterFailed {
            command: self.command.clone(),
            reason,
        }
        .into()
    }
}

impl Default for RuffFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND)
    }
}

impl Formatter for RuffFormatter {
    #[instrument(skip(self), fields(command = %self.command))]
    fn format(&self, path: &Path) -> DashBuilderResult<FormatOutcome> {
        self.run(&["format"], path)?;
        self.run(&["check", "--select", "I", "--fix"], path)?;
        Ok(FormatOutcome::Formatted)
    }
}

fn check_status(output: &Output) -> Result<(), String> {
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    let detail = stderr.trim();
    Err(match output.status.code() {
        Some(code) if detail.is_empty() => format!("exited with status {code}"),
        Some(code) => format!("exited with status {code}: {detail}"),
        None => "terminated by signal".to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_command_is_reported_as_formatter_failure() {
        let formatter = RuffFormatter::new("dash-builder-no-such-formatter");
        let err = formatter.format(Path::new(".")).unwrap_err();

        let text = err.to_string();
        assert!(text.contains("dash-builder-no-such-formatter"), "{text}");
        assert!(text.contains("could not start"), "{text}");
    }

    #[test]
    fn noop_formatter_skips() {
        use crate::formatter::NoopFormatter;
        assert_eq!(
            NoopFormatter.format(Path::new(".")).unwrap(),
            FormatOutcome::Skipped
        );
    }

    #[cfg(unix)]
    #[test]
    fn failing_command_reports_exit_status() {
        // `false` accepts any arguments and exits 1.
        let err = RuffFormatter::new("false").format(Path::new(".")).unwrap_err();
        assert!(err.to_string().contains("exited with status 1"));
    }
}
