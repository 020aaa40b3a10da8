//! Configuration module
//!
//! Reads `config.toml` from `$VOLTIX_CONFIG` or the user config directory
//! (`~/.config/voltix/config.toml` on Linux). Every field has a default.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::infrastructure::database::{DatabaseConfig, DEFAULT_DATABASE_URL};
use crate::shared::errors::ConfigError;

/// Root of `config.toml`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: Option<u32>,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// `EnvFilter` directive, e.g. "info" or "voltix_billing=debug"
    pub level: String,
    /// Emit JSON lines instead of the human-readable format
    pub json: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Database settings, with `DATABASE_URL` taking precedence over the file
    pub fn database_config(&self) -> DatabaseConfig {
        let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| self.database.url.clone());
        DatabaseConfig {
            url,
            max_connections: self.database.max_connections,
        }
    }
}

/// `$VOLTIX_CONFIG`, else `<config dir>/voltix/config.toml`
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var("VOLTIX_CONFIG") {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("voltix")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(cfg.database.max_connections, None);
        assert_eq!(cfg.logging.level, "info");
        assert!(!cfg.logging.json);
    }

    #[test]
    fn sections_override_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [database]
            url = "sqlite://./billing.db?mode=rwc"
            max_connections = 4

            [logging]
            level = "debug"
            json = true
            "#,
        )
        .unwrap();
        assert_eq!(cfg.database.url, "sqlite://./billing.db?mode=rwc");
        assert_eq!(cfg.database.max_connections, Some(4));
        assert_eq!(cfg.logging.level, "debug");
        assert!(cfg.logging.json);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let cfg = AppConfig::from_toml("[logging]\njson = true\n").unwrap();
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.logging.json);
    }

    #[test]
    fn malformed_file_is_rejected() {
        assert!(AppConfig::from_toml("[database\nurl = 1").is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = AppConfig::load(Path::new("/nonexistent/voltix/config.toml")).unwrap();
        assert_eq!(cfg.logging.level, "info");
    }
}
