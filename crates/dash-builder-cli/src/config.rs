//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `DASH_BUILDER_TEMPLATES_DIR` for `templates.local_path`
//! 3. Environment variables `DASH_BUILDER__<SECTION>__<KEY>`
//! 4. Local `.dash-builder.toml` in the current directory
//! 5. User config file (`--config FILE` or [`AppConfig::config_path`])
//! 6. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// File name of the per-project configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".dash-builder.toml";

/// Overrides `templates.local_path`.
pub const TEMPLATES_DIR_ENV: &str = "DASH_BUILDER_TEMPLATES_DIR";

const ENV_PREFIX: &str = "DASH_BUILDER";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults for `build`.
    pub defaults: Defaults,
    /// Post-generation formatter.
    pub formatter: FormatterConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Template discovery.
    pub templates: TemplateConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub template: String,
    pub location: PathBuf,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            template: dash_builder_adapters::builtin_templates::DEFAULT_TEMPLATE.into(),
            location: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    pub enabled: bool,
    pub command: String,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: dash_builder_adapters::formatter::DEFAULT_COMMAND.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Extra directory scanned for `<name>/template.toml` templates.
    pub local_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append log events to this file in addition to stderr.
    pub file: Option<PathBuf>,
}

/// How a configuration key's value is parsed by `config set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyKind {
    Bool,
    Text,
}

const KEYS: &[(&str, KeyKind)] = &[
    ("defaults.template", KeyKind::Text),
    ("defaults.location", KeyKind::Text),
    ("formatter.enabled", KeyKind::Bool),
    ("formatter.command", KeyKind::Text),
    ("output.no_color", KeyKind::Bool),
    ("templates.local_path", KeyKind::Text),
    ("logging.file", KeyKind::Text),
];

/// Errors from reading or editing individual keys.
#[derive(Debug, thiserror::Error)]
pub enum ConfigKeyError {
    #[error("unknown config key '{0}'")]
    UnknownKey(String),

    #[error("invalid value '{value}' for '{key}': expected true or false")]
    InvalidBool { key: String, value: String },

    #[error("'{path}' is not a valid configuration file: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("'{key}' cannot be set because '{section}' is not a table in the configuration file")]
    NotATable { key: String, section: String },
}

impl AppConfig {
    /// Load configuration from every layer.
    ///
    /// `config_file` is the path passed via `--config`; `None` uses
    /// [`Self::config_path`]. Missing files are not an error.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let user_file = config_file
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path);

        let defaults = Config::try_from(&Self::default())
            .context("failed to serialise built-in configuration defaults")?;

        let settings = Config::builder()
            .add_source(defaults)
            .add_source(
                File::from(user_file.as_path())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                File::from(Path::new(LOCAL_CONFIG_FILE))
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read configuration from {}", user_file.display()))?;

        let mut config: Self = settings
            .try_deserialize()
            .context("configuration has invalid values")?;

        if let Some(dir) = std::env::var_os(TEMPLATES_DIR_ENV).filter(|v| !v.is_empty()) {
            config.templates.local_path = Some(PathBuf::from(dir));
        }

        tracing::debug!(?config, file = %user_file.display(), "configuration loaded");
        Ok(config)
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.dash-builder.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "dash-builder", "dash-builder")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Value of a dotted key as it would be printed by `config get`.
    /// Unset optional keys are empty.
    pub fn get(&self, key: &str) -> Result<String, ConfigKeyError> {
        let value = match key {
            "defaults.template" => self.defaults.template.clone(),
            "defaults.location" => self.defaults.location.display().to_string(),
            "formatter.enabled" => self.formatter.enabled.to_string(),
            "formatter.command" => self.formatter.command.clone(),
            "output.no_color" => self.output.no_color.to_string(),
            "templates.local_path" => display_optional(self.templates.local_path.as_deref()),
            "logging.file" => display_optional(self.logging.file.as_deref()),
            _ => return Err(ConfigKeyError::UnknownKey(key.to_owned())),
        };
        Ok(value)
    }

    /// Every known key, in display order.
    pub fn keys() -> impl Iterator<Item = &'static str> {
        KEYS.iter().map(|(k, _)| *k)
    }
}

fn display_optional(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string()).unwrap_or_default()
}

/// Set `key` to `value` inside the TOML document `existing`, returning the
/// updated document. Other keys and sections are preserved.
pub fn set_key(existing: &str, path: &Path, key: &str, value: &str) -> Result<String, ConfigKeyError> {
    let kind = KEYS
        .iter()
        .find_map(|(k, kind)| (*k == key).then_some(*kind))
        .ok_or_else(|| ConfigKeyError::UnknownKey(key.to_owned()))?;

    let parsed = match kind {
        KeyKind::Bool => match value.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => toml::Value::Boolean(true),
            "false" | "no" | "off" | "0" => toml::Value::Boolean(false),
            _ => {
                return Err(ConfigKeyError::InvalidBool {
                    key: key.to_owned(),
                    value: value.to_owned(),
                });
            }
        },
        KeyKind::Text => toml::Value::String(value.to_owned()),
    };

    let mut table: toml::Table = if existing.trim().is_empty() {
        toml::Table::new()
    } else {
        existing.parse().map_err(|source| ConfigKeyError::Parse {
            path: path.to_path_buf(),
            source,
        })?
    };

    // Every known key is `section.field`.
    let (section, field) = key.split_once('.').unwrap_or((key, ""));
    let entry = table
        .entry(section.to_owned())
        .or_insert_with(|| toml::Value::Table(toml::Table::new()));
    let toml::Value::Table(section_table) = entry else {
        return Err(ConfigKeyError::NotATable {
            key: key.to_owned(),
            section: section.to_owned(),
        });
    };
    section_table.insert(field.to_owned(), parsed);

    Ok(table.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template_is_basic() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.template, "basic");
        assert_eq!(cfg.defaults.location, PathBuf::from("."));
    }

    #[test]
    fn formatter_enabled_by_default() {
        let cfg = AppConfig::default();
        assert!(cfg.formatter.enabled);
        assert_eq!(cfg.formatter.command, "ruff");
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn load_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[defaults]\ntemplate = \"basic-mantine\"\n\n[formatter]\nenabled = false\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(cfg.defaults.template, "basic-mantine");
        assert!(!cfg.formatter.enabled);
        // untouched keys keep their defaults
        assert_eq!(cfg.formatter.command, "ruff");
    }

    #[test]
    fn load_with_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load(Some(dir.path().join("absent.toml").as_path())).unwrap();
        assert_eq!(cfg.defaults.template, "basic");
    }

    #[test]
    fn load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[defaults\ntemplate = ").unwrap();
        assert!(AppConfig::load(Some(path.as_path())).is_err());
    }

    #[test]
    fn get_known_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("defaults.template").unwrap(), "basic");
        assert_eq!(cfg.get("output.no_color").unwrap(), "false");
        assert_eq!(cfg.get("templates.local_path").unwrap(), "");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            cfg.get("does.not.exist"),
            Err(ConfigKeyError::UnknownKey(_))
        ));
    }

    #[test]
    fn every_listed_key_is_readable() {
        let cfg = AppConfig::default();
        for key in AppConfig::keys() {
            assert!(cfg.get(key).is_ok(), "{key} should be readable");
        }
    }

    #[test]
    fn set_key_preserves_other_sections() {
        let existing = "[defaults]\ntemplate = \"basic\"\n\n[output]\nno_color = true\n";
        let updated = set_key(existing, Path::new("c.toml"), "formatter.enabled", "off").unwrap();
        let cfg: AppConfig = toml::from_str(&updated).unwrap();
        assert!(!cfg.formatter.enabled);
        assert!(cfg.output.no_color);
        assert_eq!(cfg.defaults.template, "basic");
    }

    #[test]
    fn set_key_on_empty_document() {
        let updated = set_key("", Path::new("c.toml"), "templates.local_path", "/srv/templates").unwrap();
        let cfg: AppConfig = toml::from_str(&updated).unwrap();
        assert_eq!(cfg.templates.local_path, Some(PathBuf::from("/srv/templates")));
    }

    #[test]
    fn set_key_rejects_bad_bool_and_unknown_key() {
        assert!(matches!(
            set_key("", Path::new("c.toml"), "output.no_color", "maybe"),
            Err(ConfigKeyError::InvalidBool { .. })
        ));
        assert!(matches!(
            set_key("", Path::new("c.toml"), "defaults.language", "rust"),
            Err(ConfigKeyError::UnknownKey(_))
        ));
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
