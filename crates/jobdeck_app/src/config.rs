//! RON configuration file for the jobdeck binary.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use jobdeck_core::DEFAULT_PAGE_SIZE;
use jobdeck_engine::ApiSettings;
use jobdeck_logging::LogDestination;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "jobdeck.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum LogTarget {
    Terminal,
    #[default]
    File,
    Both,
    Off,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
            LogTarget::Off => LogDestination::Off,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Job listing endpoint; `?page=N` is appended per request.
    pub api_base_url: String,
    pub page_size: usize,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
    /// Directory holding the bookmark file.
    pub data_dir: PathBuf,
    pub log: LogTarget,
}

impl Default for AppConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            api_base_url: api.base_url,
            page_size: DEFAULT_PAGE_SIZE,
            connect_timeout_secs: api.connect_timeout.as_secs(),
            request_timeout_secs: api.request_timeout.as_secs(),
            max_response_bytes: api.max_bytes,
            data_dir: PathBuf::from("./jobdeck_data"),
            log: LogTarget::default(),
        }
    }
}

impl AppConfig {
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api_base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_response_bytes,
            ..ApiSettings::default()
        }
    }
}

/// Reads the config file. A missing file is not an error and yields defaults.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("jobdeck.ron");
        fs::write(
            &path,
            r#"(api_base_url: "https://jobs.example.com/api/jobs", page_size: 20, log: Both)"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.api_base_url, "https://jobs.example.com/api/jobs");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.log, LogTarget::Both);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn malformed_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("jobdeck.ron");
        fs::write(&path, "(page_size: \"many\"").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn api_settings_follow_config() {
        let config = AppConfig {
            request_timeout_secs: 5,
            max_response_bytes: 1024,
            ..AppConfig::default()
        };
        let settings = config.api_settings();
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
        assert_eq!(settings.max_bytes, 1024);
        assert_eq!(settings.page_param, "page");
    }
}
