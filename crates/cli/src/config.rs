// ABOUTME: Optional TOML configuration for the rsspager binary.
// ABOUTME: [menu], [validation], and [fetch] tables; a missing or empty file yields defaults.

use std::path::Path;
use std::time::Duration;

use rsspager_feed::ValidationOptions;
use rsspager_menu::MenuConfig;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config file too large: {0}")]
    TooLarge(String),
}

/// HTTP settings for the fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("rsspager/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Top-level configuration. Any subset of keys may be given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub menu: MenuConfig,
    pub validation: ValidationOptions,
    pub fetch: FetchConfig,
}

impl Config {
    const MAX_FILE_SIZE: u64 = 1_048_576;
    const KNOWN_KEYS: [&'static str; 3] = ["menu", "validation", "fetch"];

    /// Loads configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)`
    /// - Unknown top-level keys → accepted, logged as a warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "{} is {} bytes (max {} bytes)",
                    path.display(),
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            page_size = config.menu.page_size,
            "loaded configuration"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_file_returns_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_empty_file_returns_default() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "  \n");
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "[menu]\npage_size = 5\n\n[validation]\nrequire_item_text = true\n",
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.menu.page_size, 5);
        assert_eq!(config.menu.preview_chars, 10);
        assert!(config.validation.require_item_text);
        assert_eq!(config.fetch, FetchConfig::default());
    }

    #[test]
    fn test_unknown_keys_are_accepted() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "theme = \"dark\"\n[fetch]\ntimeout_secs = 5\n");

        let config = Config::load(&path).unwrap();
        assert_eq!(config.fetch.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[menu\npage_size = ");
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_oversized_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let filler = "# padding\n".repeat(110_000);
        let path = write_config(&dir, &filler);
        assert!(matches!(Config::load(&path), Err(ConfigError::TooLarge(_))));
    }
}
