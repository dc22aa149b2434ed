use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::fetch::FetchError;
use crate::registry::RegistryError;

pub const DEFAULT_CELESTRAK_URL: &str =
    "https://celestrak.org/NORAD/elements/gp.php?CATNR={catnr}&FORMAT=TLE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("satellite registry: {0}")]
    Registry(#[from] RegistryError),
    #[error("HTTP client: {0}")]
    Client(#[from] FetchError),
    #[error("invalid duration: {0}")]
    Duration(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// JSON file mapping display name to NORAD catalog number. Relative paths
    /// are resolved against the config file's directory.
    pub satellites_file: PathBuf,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub celestrak: CelestrakConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CelestrakConfig {
    /// Query URL with a `{catnr}` placeholder.
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_timeout", deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
    #[serde(default = "default_cache_ttl", deserialize_with = "deserialize_duration")]
    pub cache_ttl: Duration,
}

impl Default for CelestrakConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout: default_timeout(),
            cache_ttl: default_cache_ttl(),
        }
    }
}

fn default_url() -> String {
    DEFAULT_CELESTRAK_URL.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(20)
}

fn default_cache_ttl() -> Duration {
    Duration::from_secs(3600)
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml_str(&content)?;
        if config.satellites_file.is_relative() {
            if let Some(dir) = path.parent() {
                config.satellites_file = dir.join(&config.satellites_file);
            }
        }
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn cache_ttl(&self) -> Result<chrono::Duration, ConfigError> {
        chrono::Duration::from_std(self.celestrak.cache_ttl)
            .map_err(|e| ConfigError::Duration(e.to_string()))
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}
