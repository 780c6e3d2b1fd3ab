//! Command handlers. Each handler wires adapters into a core service,
//! runs it and reports through [`OutputManager`](crate::output::OutputManager).

use dash_builder_adapters::{InMemoryStore, NoopFormatter, RuffFormatter, builtin_templates};
use dash_builder_core::application::Formatter;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::error::CliResult;

pub mod add;
pub mod build;
pub mod completions;
pub mod config;
pub mod init;
pub mod list;

/// Builtin templates overlaid with directory templates. The configured
/// directory is loaded last so it wins over the one next to the executable.
pub(crate) fn template_store(config: &AppConfig) -> CliResult<InMemoryStore> {
    let store = InMemoryStore::with_builtin()?;

    let configured = config.templates.local_path.as_deref();
    if let Some(dir) = configured {
        if !dir.is_dir() {
            warn!(dir = %dir.display(), "Configured templates directory does not exist");
        }
    }

    for dir in builtin_templates::candidate_dirs(configured).iter().rev() {
        match store.load_directory(dir) {
            Ok(count) => debug!(dir = %dir.display(), count, "Loaded directory templates"),
            Err(e) => warn!(dir = %dir.display(), error = %e, "Skipping templates directory"),
        }
    }

    Ok(store)
}

/// The formatter to run after generation, honouring `--no-format`.
pub(crate) fn formatter(config: &AppConfig, no_format: bool) -> Box<dyn Formatter> {
    if no_format || !config.formatter.enabled {
        Box::new(NoopFormatter)
    } else {
        Box::new(RuffFormatter::new(config.formatter.command.clone()))
    }
}
