use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_FRACTIONAL_DIGITS: u32 = 6;
pub const DEFAULT_DELIMITER: &str = ",";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid value for `{field}` in config file at {config_path}: {reason}")]
    ConfigValueError {
        config_path: PathBuf,
        field: &'static str,
        reason: &'static str,
    },
}

/// Defaults for the `bytespan` sub-commands. Every field is optional in the
/// file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Digits after the point for `format-double` when `--digits` is absent.
    pub fractional_digits: u32,
    /// Delimiter for `split` when `--delimiter` is absent.
    pub delimiter: String,
    /// Buffer capacity for `replace` when `--capacity` is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_capacity: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            fractional_digits: DEFAULT_FRACTIONAL_DIGITS,
            delimiter: DEFAULT_DELIMITER.to_string(),
            replace_capacity: None,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // An empty delimiter cannot split anything
        if config.delimiter.is_empty() {
            return Err(ConfigError::ConfigValueError {
                config_path: config_path.to_path_buf(),
                field: "delimiter",
                reason: "must not be empty",
            });
        }

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// The stored config, or the defaults when there is no file.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/bytespan");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }
}
