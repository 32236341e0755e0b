//! Application configuration

use std::env;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::domain::value_objects::DieSize;

/// Which persistence adapter to run with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StorageBackend::Sqlite),
            "memory" => Ok(StorageBackend::Memory),
            other => bail!("Unknown storage backend '{}' (expected sqlite or memory)", other),
        }
    }
}

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite connection URL
    pub database_url: String,
    pub storage: StorageBackend,
    /// HTTP server port
    pub server_port: u16,
    /// Die every skill of a new character starts with
    pub starting_die: DieSize,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let starting_die: i64 = lookup("STARTING_DIE")
            .unwrap_or_else(|| "6".to_string())
            .parse()
            .context("STARTING_DIE must be a number")?;

        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://saltandpowder.db?mode=rwc".to_string()),
            storage: lookup("STORAGE")
                .unwrap_or_else(|| "sqlite".to_string())
                .parse()
                .context("STORAGE is invalid")?,
            server_port: lookup("SERVER_PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            starting_die: DieSize::clamped(starting_die),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.storage, StorageBackend::Sqlite);
        assert_eq!(config.starting_die, DieSize::D6);
        assert!(config.database_url.starts_with("sqlite://"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SERVER_PORT", "8080"),
            ("STORAGE", "Memory"),
            ("STARTING_DIE", "12"),
        ])
        .unwrap();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.starting_die, DieSize::D10);
    }

    #[test]
    fn test_invalid_values() {
        assert!(config_from(&[("SERVER_PORT", "ninety")]).is_err());
        assert!(config_from(&[("STORAGE", "neo4j")]).is_err());
        assert!(config_from(&[("STARTING_DIE", "d8")]).is_err());
    }
}
