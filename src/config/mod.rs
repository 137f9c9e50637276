use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::state::Theme;

/// Application directory name under the user's config and data dirs.
pub const APP_DIR: &str = "rpgkit";

/// Configuration file name.
pub const CONFIG_FILE: &str = "rpgkit.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Application configuration loaded from rpgkit.json.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Theme applied at startup.
    #[serde(default, deserialize_with = "deserialize_theme")]
    pub theme: Theme,

    /// Shortcut labels to register on top of the defaults, keyed by action
    /// or menu id.
    #[serde(default)]
    pub shortcuts: BTreeMap<String, String>,

    /// Directory for the action log. Defaults to the user data directory.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a JSON file.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Default location: `<config dir>/rpgkit/rpgkit.json`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(CONFIG_FILE)
    }

    /// Directory the action log is written to.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
        })
    }
}

fn deserialize_theme<'de, D>(deserializer: D) -> Result<Theme, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(name) => name.parse().map_err(serde::de::Error::custom),
        serde_json::Value::Null => Ok(Theme::default()),
        _ => Err(serde::de::Error::custom("theme must be \"light\" or \"dark\"")),
    }
}
