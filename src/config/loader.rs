//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.userdesk.toml` in the working directory
//! 4. `~/.config/userdesk/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, ENV_API_TOKEN, ENV_API_URL, ENV_FORMAT,
    ENV_TIMEOUT_SECS,
};
use crate::env::Env;
use crate::models::OutputFormat;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub output: OutputConfig,
}

/// Remote API settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Sent as a bearer token when present.
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads the global config, then `dir/.userdesk.toml`, then applies
    /// environment variable overrides. CLI flags are applied by the caller.
    pub fn load(dir: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config.merge(Self::load_file(&global_path)?);
            }
        }

        if let Some(dir) = dir {
            let local_path = dir.join(crate::constants::CONFIG_FILENAME);
            if local_path.exists() {
                config.merge(Self::load_file(&local_path)?);
            }
        }

        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load a config from a specific file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(crate::constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge another config into this one; non-default values in `other` win.
    fn merge(&mut self, other: Config) {
        let default_api = ApiConfig::default();
        if other.api.base_url != default_api.base_url {
            self.api.base_url = other.api.base_url;
        }
        if other.api.token.is_some() {
            self.api.token = other.api.token;
        }
        if other.api.timeout_secs != default_api.timeout_secs {
            self.api.timeout_secs = other.api.timeout_secs;
        }

        if other.output.format != OutputFormat::default() {
            self.output.format = other.output.format;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(url) = env.get(ENV_API_URL) {
            self.api.base_url = url;
        }
        if let Some(token) = env.get(ENV_API_TOKEN) {
            self.api.token = Some(token);
        }
        match env.parsed::<u64>(ENV_TIMEOUT_SECS) {
            Some(Ok(secs)) if secs > 0 => self.api.timeout_secs = secs,
            Some(Ok(_)) | Some(Err(_)) => {
                warn!(var = ENV_TIMEOUT_SECS, "ignoring invalid timeout value");
            }
            None => {}
        }
        match env.parsed::<OutputFormat>(ENV_FORMAT) {
            Some(Ok(format)) => self.output.format = format,
            Some(Err(raw)) => warn!(var = ENV_FORMAT, value = %raw, "ignoring invalid output format"),
            None => {}
        }
    }
}
