use crate::errors::{AppError, AppResult};
use crate::store::{DEFAULT_DELIMITED_STORE, DEFAULT_TABULAR_STORE, StorePaths};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_tabular_store")]
    pub tabular_store: String,
    #[serde(default = "default_delimited_store")]
    pub delimited_store: String,
    /// Discard a stopped session instead of logging it without description.
    #[serde(default = "default_skip_empty")]
    pub skip_empty_description: bool,
}

fn default_tabular_store() -> String {
    DEFAULT_TABULAR_STORE.to_string()
}
fn default_delimited_store() -> String {
    DEFAULT_DELIMITED_STORE.to_string()
}
fn default_skip_empty() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tabular_store: default_tabular_store(),
            delimited_store: default_delimited_store(),
            skip_empty_description: default_skip_empty(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".worklogger")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("worklogger.conf")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Store paths, with `~/` expanded.
    pub fn store_paths(&self) -> StorePaths {
        StorePaths::new(
            expand_tilde(&self.tabular_store),
            expand_tilde(&self.delimited_store),
        )
    }

    /// Write the configuration file (creating its directory)
    pub fn save(&self) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir).map_err(|_| AppError::ConfigSave)?;

        let yaml = self.to_yaml()?;
        let path = Self::config_file();
        let mut file = fs::File::create(&path).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())
            .map_err(|_| AppError::ConfigSave)?;

        Ok(path)
    }
}
