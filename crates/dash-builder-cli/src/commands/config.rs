//! `dash-builder config`: read and write configuration values.

use std::path::PathBuf;

use crate::{
    cli::{ConfigCommands, GlobalArgs, OutputFormat},
    config::{self, AppConfig},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config.get(&key)?;
            println!("{value}");
        }

        ConfigCommands::Set { key, value } => {
            let path = config_file(&global);
            set_value(&path, &key, &value)?;
            output.success(&format!("Set {key} = {value} in {}", path.display()))?;
        }

        ConfigCommands::List => {
            if output.format() == OutputFormat::Json {
                output.json(&config)?;
            } else {
                output.header("Current Configuration:")?;
                let serialised =
                    toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                        message: format!("Failed to serialise config: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                output.print(serialised.trim_end())?;
            }
        }

        ConfigCommands::Path => {
            println!("{}", config_file(&global).display());
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn config_file(global: &GlobalArgs) -> PathBuf {
    global.config.clone().unwrap_or_else(AppConfig::config_path)
}

/// Update one key in the file at `path`, creating the file if needed.
fn set_value(path: &std::path::Path, key: &str, value: &str) -> CliResult<()> {
    let existing = if path.exists() {
        std::fs::read_to_string(path)
            .with_cli_context(|| format!("Failed to read '{}'", path.display()))?
    } else {
        String::new()
    };

    let updated = config::set_key(&existing, path, key, value)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create '{}'", parent.display()))?;
    }
    std::fs::write(path, updated)
        .with_cli_context(|| format!("Failed to write '{}'", path.display()))?;
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────
