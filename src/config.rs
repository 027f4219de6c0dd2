// src/config.rs
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use crate::errors::{PortalError, Result};

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 4000;

/// High-level application configuration loaded from environment variables,
/// optionally layered over a TOML file named by `PORTAL_CONFIG`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the OCR backend, without a trailing slash.
    pub backend_url: String,
    /// Token passed to the backend as the `token` query parameter.
    pub backend_token: Option<String>,
    pub bind: String,
    pub jobs_poll_interval: Duration,
    /// Directory holding uploads while they are forwarded.
    pub spool_dir: PathBuf,
}

/// On-disk form of the configuration. Every key is optional; environment
/// variables take precedence.
#[derive(Deserialize, Debug, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub backend_url: Option<String>,
    #[serde(default)]
    pub backend_token: Option<String>,
    #[serde(default)]
    pub portal_bind: Option<String>,
    #[serde(default)]
    pub jobs_poll_interval_ms: Option<u64>,
    #[serde(default)]
    pub upload_spool_dir: Option<PathBuf>,
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let file = match std::env::var("PORTAL_CONFIG") {
            Ok(path) => {
                log::info!("Reading configuration file {}", path);
                FileConfig::parse(&std::fs::read_to_string(&path)?)?
            }
            Err(_) => FileConfig::default(),
        };
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Merges a file config with values from `lookup`, which wins on conflicts.
    pub fn resolve<F>(file: FileConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup("BACKEND_URL")
            .or(file.backend_url)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| PortalError::Config("BACKEND_URL must be set".to_string()))?;

        let backend_token = lookup("BACKEND_TOKEN")
            .or(file.backend_token)
            .filter(|token| !token.is_empty());

        let bind = lookup("PORTAL_BIND")
            .or(file.portal_bind)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());

        let poll_ms = match lookup("JOBS_POLL_INTERVAL_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                PortalError::Config(format!("JOBS_POLL_INTERVAL_MS is not a number: {}", raw))
            })?,
            None => file.jobs_poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS),
        };
        if poll_ms == 0 {
            return Err(PortalError::Config(
                "JOBS_POLL_INTERVAL_MS must be greater than zero".to_string(),
            ));
        }

        let spool_dir = lookup("UPLOAD_SPOOL_DIR")
            .map(PathBuf::from)
            .or(file.upload_spool_dir)
            .unwrap_or_else(default_spool_dir);

        Ok(AppConfig {
            backend_url,
            backend_token,
            bind,
            jobs_poll_interval: Duration::from_millis(poll_ms),
            spool_dir,
        })
    }
}

fn default_spool_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("ocr-portal")
        .join("uploads")
}
