//! Shared configuration for the shelf tools.
//!
//! One flat TOML file plus `SHELF_*` environment overrides, resolved with
//! figment, and translation to `shelf_core::CatalogConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shelf_core::CatalogConfig;
use shelf_core::config::{DEFAULT_API_URL, DEFAULT_TIMEOUT};
use shelf_core::session::DEFAULT_LOGIN_DELAY;

/// File holding the persisted session and other key-value state.
const STORAGE_FILE: &str = "storage.json";

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

// ── TOML config ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Data API root (e.g. "http://localhost:3000").
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Simulated sign-in latency in milliseconds.
    #[serde(default = "default_login_delay_ms")]
    pub login_delay_ms: u64,

    /// Override for the session storage file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,

    /// Accept invalid TLS certificates.
    #[serde(default)]
    pub insecure: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout: default_timeout(),
            login_delay_ms: default_login_delay_ms(),
            storage_path: None,
            insecure: false,
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}
fn default_login_delay_ms() -> u64 {
    u64::try_from(DEFAULT_LOGIN_DELAY.as_millis()).unwrap_or(800)
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "shelf", "shelf")
}

fn home_fallback(parts: &[&str]) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.extend(parts);
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(&[".config", "shelf", "config.toml"]),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Platform data directory for shelf state.
pub fn data_dir() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(&[".local", "share", "shelf"]),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

impl Config {
    /// Where the session is persisted: the configured override, or
    /// `storage.json` in the data directory.
    pub fn storage_path(&self) -> PathBuf {
        self.storage_path
            .clone()
            .unwrap_or_else(|| data_dir().join(STORAGE_FILE))
    }
}

// ── Loading / saving ────────────────────────────────────────────────

/// Load config from the canonical file plus `SHELF_*` environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path` plus `SHELF_*` environment. A missing file is
/// not an error; defaults fill in.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SHELF_"))
        .extract()?;
    Ok(config)
}

/// Serialize config to TOML and write it to the canonical path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `CatalogConfig` from a loaded config, no CLI overrides.
pub fn to_catalog_config(cfg: &Config) -> Result<CatalogConfig, ConfigError> {
    let api_url = parse_api_url(&cfg.api_url)?;
    let mut catalog = CatalogConfig::new(api_url)
        .with_timeout(Duration::from_secs(cfg.timeout))
        .with_login_delay(Duration::from_millis(cfg.login_delay_ms));
    catalog.insecure = cfg.insecure;
    Ok(catalog)
}

/// Parse and check a data API root URL.
pub fn parse_api_url(raw: &str) -> Result<url::Url, ConfigError> {
    let url = url::Url::parse(raw).map_err(|e| ConfigError::Validation {
        field: "api_url".into(),
        reason: format!("{raw}: {e}"),
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("expected an http(s) URL, got '{raw}'"),
        });
    }
    Ok(url)
}
