use folio_compiler_html::CompileOptions;
use folio_editor::{SavePolicy, SpanPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_NAME: &str = "folio.config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Folio configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding one JSON record per page
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,

    /// Treatment of column spans larger than their grid
    #[serde(default)]
    pub span_policy: SpanPolicy,

    /// Treatment of a save requested while another is pending
    #[serde(default)]
    pub save_policy: SavePolicy,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Static HTML output options
    #[serde(default)]
    pub compile: CompileOptions,
}

fn default_storage_dir() -> String {
    "pages".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load config from a directory, falling back to defaults when the file is absent
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get absolute path to the storage directory
    pub fn get_storage_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.storage_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            span_policy: SpanPolicy::default(),
            save_policy: SavePolicy::default(),
            log_level: default_log_level(),
            compile: CompileOptions::default(),
        }
    }
}
