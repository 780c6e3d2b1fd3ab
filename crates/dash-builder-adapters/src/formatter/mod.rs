//! Source formatters run on generated files.

mod ruff;

pub use ruff::{DEFAULT_COMMAND, RuffFormatter};

use std::path::Path;

use dash_builder_core::{
    application::{FormatOutcome, ports::Formatter},
    error::DashBuilderResult,
};

/// Formatter used with `--no-format` or `formatter.enabled = false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFormatter;

impl Formatter for NoopFormatter {
    fn format(&self, _path: &Path) -> DashBuilderResult<FormatOutcome> {
        Ok(FormatOutcome::Skipped)
    }
}
