//! Configuration for the crmdash TUI.
//!
//! A small TOML file (record endpoints, timeout, log file) layered under
//! `CRMDASH_*` environment variables, and its translation into
//! `crmdash_core::SourceConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crmdash_api::{DEFAULT_LEADS_URL, DEFAULT_PRODUCTS_URL, Endpoints};
use crmdash_core::SourceConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub endpoints: EndpointUrls,

    #[serde(default)]
    pub defaults: Defaults,
}

/// Where the two record lists come from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EndpointUrls {
    #[serde(default = "default_leads")]
    pub leads: String,

    #[serde(default = "default_products")]
    pub products: String,
}

impl Default for EndpointUrls {
    fn default() -> Self {
        Self {
            leads: default_leads(),
            products: default_products(),
        }
    }
}

fn default_leads() -> String {
    DEFAULT_LEADS_URL.into()
}
fn default_products() -> String {
    DEFAULT_PRODUCTS_URL.into()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Where the TUI writes its log.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Extra CA certificate (PEM) to trust.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            log_file: default_log_file(),
            ca_cert: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}
fn default_log_file() -> PathBuf {
    std::env::temp_dir().join("crmdash.log")
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "crmdash", "crmdash").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("crmdash");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load from an explicit file. A missing file just means defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("CRMDASH_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `SourceConfig` from the loaded config.
pub fn to_source_config(cfg: &Config) -> Result<SourceConfig, ConfigError> {
    let endpoints = Endpoints {
        leads: parse_url("endpoints.leads", &cfg.endpoints.leads)?,
        products: parse_url("endpoints.products", &cfg.endpoints.products)?,
    };

    if cfg.defaults.timeout == 0 {
        return Err(ConfigError::Validation {
            field: "defaults.timeout".into(),
            reason: "must be at least 1 second".into(),
        });
    }

    Ok(SourceConfig {
        endpoints,
        timeout: Duration::from_secs(cfg.defaults.timeout),
        ca_cert: cfg.defaults.ca_cert.clone(),
    })
}

fn parse_url(field: &str, raw: &str) -> Result<url::Url, ConfigError> {
    let url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL: {raw}"),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Validation {
            field: field.into(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}
