//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following precedence (highest to lowest):
//! 1. Environment variables (prefix: USERADMIN_), after loading an optional `.env`
//! 2. Current working directory: ./config.toml
//! 3. XDG config directory: ~/.config/useradmin/config.toml
//! 4. System directory: /etc/useradmin/config.toml
//! 5. Default values
//!
//! Environment keys map to `<section>.<key>`: `USERADMIN_API_HOST` sets
//! `api.host`, `USERADMIN_LOG_LEVEL` sets `log.level`. `USERADMIN_API_URL`
//! is accepted as a shorthand for `api.base_url`.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "USERADMIN_";

const APP_DIR: &str = "useradmin";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// REST backend location
    #[serde(default)]
    pub api: ApiConfig,

    /// Terminal front-end behaviour
    #[serde(default)]
    pub ui: UiConfig,

    /// Logging
    #[serde(default)]
    pub log: LogConfig,
}

/// REST backend location
///
/// `base_url` wins when set; otherwise the URL is assembled from
/// `scheme`, `host` and `port`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Full base URL, e.g. `https://users.example.com/`
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_scheme")]
    pub scheme: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Terminal front-end behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Pause after a successful form before returning to the table
    #[serde(default = "default_close_delay_ms")]
    pub close_delay_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level or EnvFilter directive (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

// Default value functions
fn default_scheme() -> String {
    "http".to_string()
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_close_delay_ms() -> u64 {
    220
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            scheme: default_scheme(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            close_delay_ms: default_close_delay_ms(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl ApiConfig {
    /// Resolved base URL, always ending in `/`
    pub fn base_url(&self) -> Result<Url> {
        let raw = match self.base_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => {
                if self.host.trim().is_empty() {
                    return Err(Error::InvalidBaseUrl("host is empty".to_string()));
                }
                format!("{}://{}:{}/", self.scheme, self.host.trim(), self.port)
            }
        };

        let mut url = Url::parse(&raw).map_err(|e| Error::InvalidBaseUrl(format!("{raw}: {e}")))?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(format!("{raw}: not a base URL")));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

impl UiConfig {
    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }
}

impl Config {
    /// Load configuration from all sources
    ///
    /// Every existing file below is merged as a layer over the defaults,
    /// so a key set in a higher file overrides the same key in a lower one
    /// while keys it leaves out fall through (highest first):
    /// 1. Current working directory: ./config.toml
    /// 2. XDG config directory: ~/.config/useradmin/config.toml
    /// 3. System directory: /etc/useradmin/config.toml
    ///
    /// Environment variables (USERADMIN_ prefix) override all file-based configs.
    pub fn load() -> Result<Self> {
        // A missing .env is normal
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from: {}", path.display());
        }

        let config_paths = Self::find_config_paths();

        tracing::debug!("Searching for config files in order:");
        for path in &config_paths {
            tracing::debug!("  - {}", path.display());
        }

        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Lowest priority first so higher priority files override
        for path in config_paths.iter().rev() {
            if path.exists() {
                tracing::info!("Loading configuration from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
        }

        Self::extract(figment)
    }

    /// Load configuration from a specific file
    ///
    /// This bypasses the search path; the file must exist. Environment
    /// variables still override it.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path));

        Self::extract(figment)
    }

    fn extract(figment: Figment) -> Result<Self> {
        let config = figment.merge(Self::env_provider()).extract()?;
        Ok(config)
    }

    /// `USERADMIN_<SECTION>_<KEY>` -> `<section>.<key>`
    fn env_provider() -> Env {
        Env::prefixed(ENV_PREFIX).map(|key| {
            let key = key.as_str().to_ascii_lowercase();
            match key.as_str() {
                "api_url" => "api.base_url".to_string().into(),
                _ => match key.split_once('_') {
                    Some((section, rest)) => format!("{section}.{rest}").into(),
                    None => key.clone().into(),
                },
            }
        })
    }

    /// Find all possible config file paths
    ///
    /// Returns paths in priority order (highest first)
    fn find_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_DIR);
        if let Some(path) = xdg_dirs.find_config_file("config.toml") {
            paths.push(path);
        }

        paths.push(PathBuf::from("/etc").join(APP_DIR).join("config.toml"));

        paths
    }

    /// Where a user-level config file is expected
    pub fn recommended_path() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix(APP_DIR)
            .get_config_home()
            .map(|dir| dir.join("config.toml"))
    }
}
