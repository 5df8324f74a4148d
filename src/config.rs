use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Client configuration, loaded from a TOML file with env and CLI
/// overrides layered on top.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Origin of the document Q&A backend, e.g. "http://127.0.0.1:8000".
    pub url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

/// Reconnect policy for the live file-update stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Reconnect after the stream drops. Each successful reconnect
    /// re-pulls the file list so the view is never silently stale.
    pub reconnect: bool,
    /// Reconnect attempts before giving up.
    pub max_retries: u32,
    /// Delay between reconnect attempts, in seconds.
    pub retry_delay_secs: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            reconnect: true,
            max_retries: 5,
            retry_delay_secs: 2,
        }
    }
}

impl Config {
    /// Load configuration. Precedence, lowest to highest: built-in
    /// defaults, config file, `DOCQ_BACKEND_URL`, `--backend` flag.
    pub fn load(path: Option<&Path>, backend_override: Option<&str>) -> Result<Self> {
        let mut config = match Self::config_path(path)? {
            Some(p) if p.exists() => {
                let raw = std::fs::read_to_string(&p)
                    .with_context(|| format!("failed to read config file '{}'", p.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("invalid config file '{}'", p.display()))?
            }
            Some(_) | None => Self::default(),
        };

        if let Ok(url) = std::env::var("DOCQ_BACKEND_URL") {
            if !url.trim().is_empty() {
                config.backend.url = url;
            }
        }
        if let Some(url) = backend_override {
            config.backend.url = url.to_string();
        }
        Ok(config)
    }

    fn config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(p) = explicit {
            let expanded = shellexpand::tilde(&p.to_string_lossy()).to_string();
            let path = PathBuf::from(expanded);
            if !path.exists() {
                bail!("config file '{}' does not exist", path.display());
            }
            return Ok(Some(path));
        }
        Ok(directories::ProjectDirs::from("", "", "docq")
            .map(|dirs| dirs.config_dir().join("config.toml")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.backend.url, DEFAULT_BACKEND_URL);
        assert!(config.watch.reconnect);
        assert_eq!(config.watch.max_retries, 5);
    }

    #[test]
    fn parses_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [backend]
            url = "http://qa.internal:9000"

            [watch]
            reconnect = false
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.url, "http://qa.internal:9000");
        assert!(!config.watch.reconnect);
        // Unset fields keep their defaults.
        assert_eq!(config.watch.retry_delay_secs, 2);
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.backend.url, DEFAULT_BACKEND_URL);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/docq.toml")), None).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
