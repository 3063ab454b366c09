//! Configuration loading and setting resolution
//!
//! Settings are resolved in this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is not an error: the client warns and runs on
//! defaults. A config file that exists but does not parse is an error.
//! Loading itself is silent because the log level comes from the file;
//! [`LoadedConfig::log_source`] reports the outcome once tracing is up.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::{Error, Result};

/// Environment variable overriding the backend base URL
pub const SERVER_URL_ENV: &str = "NOTARY_SERVER_URL";

/// Environment variable overriding the state directory
pub const STATE_DIR_ENV: &str = "NOTARY_STATE_DIR";

/// Backend base URL used when nothing else is configured
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

const APP_DIR: &str = "notary";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct TomlConfig {
    /// Backend base URL, e.g. `https://notary.example.org`
    #[serde(default)]
    pub server_url: Option<String>,

    /// Per-request timeout in seconds; no timeout when absent
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Directory holding client-local state (theme preference)
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from `path`, falling back to defaults when the file is absent
    pub fn load(path: &Path) -> Result<LoadedConfig> {
        if !path.exists() {
            return Ok(LoadedConfig {
                path: path.to_path_buf(),
                config: Self::default(),
                found: false,
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content).map_err(|e| {
            Error::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        Ok(LoadedConfig {
            path: path.to_path_buf(),
            config,
            found: true,
        })
    }
}

/// Result of [`TomlConfig::load`]
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub config: TomlConfig,
    /// False when the file was absent and defaults are in use
    pub found: bool,
}

impl LoadedConfig {
    /// Log where the settings came from
    pub fn log_source(&self) {
        if self.found {
            info!("Loaded config from {}", self.path.display());
        } else {
            warn!(
                "Config file {} not found, using built-in defaults",
                self.path.display()
            );
        }
    }
}

/// Default config file location: `<config_dir>/notary/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR).join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("./notary.toml"))
}

/// Default state directory: `<data_local_dir>/notary`
pub fn default_state_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("./notary_state"))
}

/// Resolved settings the HTTP dispatcher is built from
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL without trailing slash
    pub base_url: String,
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: &str, request_timeout: Option<Duration>) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(Error::Config(format!(
                "Server URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }
        Ok(Self {
            base_url: trimmed.to_string(),
            request_timeout,
        })
    }

    /// Absolute URL of an API path such as `/api/upload`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Applies CLI → ENV → TOML → default priority to each setting
#[derive(Debug, Clone)]
pub struct ConfigResolver<'a> {
    toml: &'a TomlConfig,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(toml: &'a TomlConfig) -> Self {
        Self { toml }
    }

    /// Backend base URL
    pub fn server_url(&self, cli_arg: Option<&str>) -> String {
        if let Some(url) = cli_arg {
            return url.to_string();
        }
        if let Some(url) = non_empty_env(SERVER_URL_ENV) {
            return url;
        }
        if let Some(url) = &self.toml.server_url {
            return url.clone();
        }
        DEFAULT_SERVER_URL.to_string()
    }

    /// Directory holding client-local state
    pub fn state_dir(&self, cli_arg: Option<&Path>) -> PathBuf {
        if let Some(dir) = cli_arg {
            return dir.to_path_buf();
        }
        if let Some(dir) = non_empty_env(STATE_DIR_ENV) {
            return PathBuf::from(dir);
        }
        if let Some(dir) = &self.toml.state_dir {
            return dir.clone();
        }
        default_state_dir()
    }

    /// Full client settings with the server URL resolved and checked
    pub fn client_config(&self, cli_server_url: Option<&str>) -> Result<ClientConfig> {
        let url = self.server_url(cli_server_url);
        let timeout = self.toml.request_timeout_secs.map(Duration::from_secs);
        ClientConfig::new(&url, timeout)
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
