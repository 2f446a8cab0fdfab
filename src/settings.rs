//! File and environment configuration for [`ClientBuilder`](crate::builder::ClientBuilder).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    backoff::{DelayStrategy, DEFAULT_JOB_POLL_MAX_DELAY},
    error::StorageError,
    executor::DEFAULT_BACKOFF_MAX_TRIES,
    jobs::DEFAULT_JOB_POLL_MAX_DURATION,
};

pub const URL_ENV: &str = "STORAGE_API_URL";
pub const TOKEN_ENV: &str = "STORAGE_API_TOKEN";

/// Client settings as written in a TOML or YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientSettings {
    pub url: Option<String>,
    pub token: Option<String>,
    pub backoff_max_tries: u32,
    pub retry_delay: DelayStrategy,
    pub job_poll_delay: DelayStrategy,
    pub job_poll_max_attempts: Option<u32>,
    pub job_poll_max_duration_seconds: Option<u64>,
    pub timeout_seconds: Option<u64>,
    pub run_id: Option<String>,
    pub user_agent: Option<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            backoff_max_tries: DEFAULT_BACKOFF_MAX_TRIES,
            retry_delay: DelayStrategy::Exponential,
            job_poll_delay: DelayStrategy::CappedExponential {
                max_delay_seconds: DEFAULT_JOB_POLL_MAX_DELAY,
            },
            job_poll_max_attempts: None,
            job_poll_max_duration_seconds: Some(DEFAULT_JOB_POLL_MAX_DURATION.as_secs()),
            timeout_seconds: None,
            run_id: None,
            user_agent: None,
        }
    }
}

impl ClientSettings {
    pub fn from_toml_str(contents: &str) -> Result<Self, StorageError> {
        toml::from_str(contents)
            .map_err(|err| StorageError::InvalidConfig(format!("settings parse error: {err}")))
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, StorageError> {
        serde_yaml::from_str(contents)
            .map_err(|err| StorageError::InvalidConfig(format!("settings parse error: {err}")))
    }

    /// Reads settings from `path`; `.yml`/`.yaml` files are YAML, anything else TOML.
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            StorageError::InvalidConfig(format!("cannot read {}: {err}", path.display()))
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml") | Some("yaml") => Self::from_yaml_str(&contents),
            _ => Self::from_toml_str(&contents),
        }
    }

    /// `<config dir>/storage-api/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("storage-api").join("config.toml"))
    }

    /// Overrides url and token with `STORAGE_API_URL` / `STORAGE_API_TOKEN` when set.
    pub fn with_env(self) -> Self {
        self.with_overrides(std::env::var(URL_ENV).ok(), std::env::var(TOKEN_ENV).ok())
    }

    /// Replaces url and token with the given values, ignoring `None` and empty strings.
    pub fn with_overrides(mut self, url: Option<String>, token: Option<String>) -> Self {
        if let Some(url) = url.filter(|v| !v.is_empty()) {
            self.url = Some(url);
        }
        if let Some(token) = token.filter(|v| !v.is_empty()) {
            self.token = Some(token);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_empty_settings_use_defaults() {
        let settings = ClientSettings::from_toml_str("").unwrap();
        assert_eq!(settings, ClientSettings::default());
        assert_eq!(settings.backoff_max_tries, 5);
    }

    #[test]
    fn test_full_toml_settings() {
        let settings = ClientSettings::from_toml_str(
            r#"
            url = "https://connection.example.com"
            token = "secret"
            backoff_max_tries = 4
            job_poll_max_attempts = 50
            timeout_seconds = 120
            run_id = "1234"

            [retry_delay]
            type = "linear"
            unit_ms = 1000

            [job_poll_delay]
            type = "capped_exponential"
            max_delay_seconds = 10
            "#,
        )
        .unwrap();

        assert_eq!(settings.url.as_deref(), Some("https://connection.example.com"));
        assert_eq!(settings.backoff_max_tries, 4);
        assert_eq!(settings.retry_delay, DelayStrategy::Linear { unit_ms: 1000 });
        assert_eq!(
            settings.job_poll_delay,
            DelayStrategy::CappedExponential {
                max_delay_seconds: 10
            }
        );
        assert_eq!(settings.job_poll_max_attempts, Some(50));
        assert_eq!(settings.job_poll_max_duration_seconds, Some(3600));
    }

    #[test]
    fn test_string_delay_function_rejected() {
        let err = ClientSettings::from_toml_str(r#"job_poll_delay = "function($tries) { return 1; }""#)
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidConfig(_)));
    }

    #[test]
    fn test_load_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "url: https://connection.example.com\nretry_delay:\n  type: constant\n  delay_ms: 10\n"
        )
        .unwrap();

        let settings = ClientSettings::load(file.path()).unwrap();
        assert_eq!(settings.retry_delay, DelayStrategy::Constant { delay_ms: 10 });
        assert_eq!(settings.url.as_deref(), Some("https://connection.example.com"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientSettings::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, StorageError::InvalidConfig(_)));
    }

    // The only test touching these variables, so parallel tests cannot race on them.
    #[test]
    fn test_env_overrides_url_and_token() {
        std::env::set_var(URL_ENV, "https://env.example.com");
        std::env::set_var(TOKEN_ENV, "env-token");

        let settings = ClientSettings {
            url: Some("https://file.example.com".to_string()),
            token: Some("file-token".to_string()),
            ..ClientSettings::default()
        }
        .with_env();

        std::env::remove_var(URL_ENV);
        std::env::remove_var(TOKEN_ENV);

        assert_eq!(settings.url.as_deref(), Some("https://env.example.com"));
        assert_eq!(settings.token.as_deref(), Some("env-token"));

        let untouched = ClientSettings {
            url: Some("https://file.example.com".to_string()),
            ..ClientSettings::default()
        }
        .with_env();
        assert_eq!(untouched.url.as_deref(), Some("https://file.example.com"));
        assert_eq!(untouched.token, None);
    }

    #[test]
    fn test_overrides_skip_empty_values() {
        let settings = ClientSettings {
            url: Some("https://a.example.com".to_string()),
            token: Some("old".to_string()),
            ..ClientSettings::default()
        }
        .with_overrides(Some(String::new()), Some("new".to_string()));

        assert_eq!(settings.url.as_deref(), Some("https://a.example.com"));
        assert_eq!(settings.token.as_deref(), Some("new"));
    }
}
