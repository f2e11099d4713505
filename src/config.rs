use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{analytics::Timeframe, catalog::seed::DEMO_USER_ID};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// daily-rolling log files go here, stdout when unset
    pub log_dir: Option<PathBuf>,
    /// JSON chapter dataset replacing the built-in one
    pub dataset: Option<PathBuf>,
    /// user served when a request names no user
    pub default_user_id: String,
    pub default_timeframe: Timeframe,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_dir: None,
            dataset: None,
            default_user_id: DEMO_USER_ID.to_string(),
            default_timeframe: Timeframe::SevenDays,
        }
    }
}

impl Config {
    /// Load from a TOML file, falling back to defaults when the file is absent.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str::<Config>(&content)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("dashboard.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.toml");
        std::fs::write(&path, "port = 9000\ndefault_timeframe = \"30d\"\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.default_timeframe, Timeframe::ThirtyDays);
        assert_eq!(config.default_user_id, "user-1");
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.toml");
        std::fs::write(&path, "port = \"not a number\"").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
