use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::catalog::{HttpOptions, DEFAULT_CATALOG_URL};
use crate::output::DEFAULT_OUTPUT_FILE;
use crate::pipeline::EntryErrorPolicy;

/// Global configuration loaded from `~/.config/resolvgen/config.toml`.
/// Command-line flags take precedence over every value here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvgenConfig {
    /// Catalog URL.
    pub source_url: String,
    /// CSV output path.
    pub output_file: PathBuf,
    /// Connection timeout for the catalog GET, in seconds.
    pub connect_timeout_secs: u64,
    /// Total transfer timeout for the catalog GET, in seconds.
    pub timeout_secs: u64,
    /// Optional User-Agent override (None = `resolvgen/<version>`).
    #[serde(default)]
    pub user_agent: Option<String>,
    /// What to do with an entry whose stamp or location cannot be formatted.
    #[serde(default)]
    pub on_entry_error: EntryErrorPolicy,
}

impl Default for ResolvgenConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_CATALOG_URL.to_string(),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            connect_timeout_secs: 15,
            timeout_secs: 60,
            user_agent: None,
            on_entry_error: EntryErrorPolicy::Abort,
        }
    }
}

impl ResolvgenConfig {
    /// Transfer settings derived from this config.
    pub fn http_options(&self) -> HttpOptions {
        let mut opts = HttpOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
            ..HttpOptions::default()
        };
        if let Some(ua) = &self.user_agent {
            opts.user_agent = ua.clone();
        }
        opts
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("resolvgen")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ResolvgenConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ResolvgenConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ResolvgenConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = ResolvgenConfig::default();
        assert_eq!(cfg.source_url, DEFAULT_CATALOG_URL);
        assert_eq!(cfg.output_file, PathBuf::from("dnscrypt-resolvers.csv"));
        assert_eq!(cfg.connect_timeout_secs, 15);
        assert_eq!(cfg.on_entry_error, EntryErrorPolicy::Abort);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = ResolvgenConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: ResolvgenConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.source_url, cfg.source_url);
        assert_eq!(parsed.output_file, cfg.output_file);
        assert_eq!(parsed.timeout_secs, cfg.timeout_secs);
        assert_eq!(parsed.on_entry_error, cfg.on_entry_error);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            source_url = "https://mirror.example.net/public-resolvers.json"
            output_file = "/srv/lists/resolvers.csv"
            connect_timeout_secs = 5
            timeout_secs = 20
            user_agent = "lists-bot/2"
            on_entry_error = "skip"
        "#;
        let cfg: ResolvgenConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.source_url, "https://mirror.example.net/public-resolvers.json");
        assert_eq!(cfg.on_entry_error, EntryErrorPolicy::Skip);
        let http = cfg.http_options();
        assert_eq!(http.connect_timeout, Duration::from_secs(5));
        assert_eq!(http.timeout, Duration::from_secs(20));
        assert_eq!(http.user_agent, "lists-bot/2");
    }

    #[test]
    fn config_toml_optional_fields_default() {
        let toml = r#"
            source_url = "https://example.com/r.json"
            output_file = "r.csv"
            connect_timeout_secs = 1
            timeout_secs = 2
        "#;
        let cfg: ResolvgenConfig = toml::from_str(toml).unwrap();
        assert!(cfg.user_agent.is_none());
        assert_eq!(cfg.on_entry_error, EntryErrorPolicy::Abort);
        assert!(cfg.http_options().user_agent.starts_with("resolvgen/"));
    }

    #[test]
    fn config_toml_rejects_unknown_policy() {
        let toml = r#"
            source_url = "https://example.com/r.json"
            output_file = "r.csv"
            connect_timeout_secs = 1
            timeout_secs = 2
            on_entry_error = "retry"
        "#;
        assert!(toml::from_str::<ResolvgenConfig>(toml).is_err());
    }
}
