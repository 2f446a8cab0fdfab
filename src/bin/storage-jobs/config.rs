use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use storage_api_client::settings::ClientSettings;

const DEFAULT_LOG_ROTATE_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_LOG_ROTATE_KEEP: usize = 5;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub path: Option<String>,
    pub rotate_size: u64,
    pub rotate_keep: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            path: None,
            rotate_size: DEFAULT_LOG_ROTATE_SIZE,
            rotate_keep: DEFAULT_LOG_ROTATE_KEEP,
        }
    }
}

/// Settings file of the CLI: client settings at the top level plus `[logging]`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CliConfig {
    pub logging: LoggingConfig,
    #[serde(flatten)]
    pub client: ClientSettings,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("config parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Loads the explicit path, or the default path when it exists, or defaults.
pub fn load_config(path_override: Option<PathBuf>) -> Result<CliConfig, ConfigError> {
    match path_override {
        Some(path) => read_config(&path),
        None => match ClientSettings::default_path() {
            Some(path) if path.exists() => read_config(&path),
            _ => Ok(CliConfig::default()),
        },
    }
}

fn read_config(path: &Path) -> Result<CliConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yml") | Some("yaml") => Ok(serde_yaml::from_str(&contents)?),
        _ => Ok(toml::from_str(&contents)?),
    }
}
