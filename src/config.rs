//! Configuration module
//!
//! Loaded once at startup from a TOML file
//! (`~/.config/park-it/config.toml` by default). Every section is optional;
//! missing keys fall back to the defaults below.
//!
//! ```toml
//! [database]
//! url = "sqlite://./parkit.db?mode=rwc"
//!
//! [logging]
//! level = "info"
//! format = "pretty"   # or "json"
//!
//! [fares]
//! car_rate_per_hour = 1.5
//! bike_rate_per_hour = 1.0
//! free_duration_secs = 1800
//! discount_multiplier = 0.95
//!
//! [facility]
//! car_spots = 3
//! bike_spots = 2
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::FareRates;
use crate::infrastructure::database::DatabaseConfig;
use crate::support::errors::InfraError;

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "PARKIT_CONFIG";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSection,
    pub logging: LoggingSection,
    pub fares: FareRates,
    pub facility: FacilitySection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: DatabaseConfig::default().url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// EnvFilter directive, e.g. "info" or "parkit=debug"
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Spot layout seeded into an empty facility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacilitySection {
    pub car_spots: u32,
    pub bike_spots: u32,
}

impl Default for FacilitySection {
    fn default() -> Self {
        Self {
            car_spots: 3,
            bike_spots: 2,
        }
    }
}

impl AppConfig {
    /// Reads the config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_toml(text: &str) -> Result<Self, InfraError> {
        Ok(toml::from_str(text)?)
    }

    /// Writes the config as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), InfraError> {
        let text = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, text)?;
        Ok(())
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
        }
    }
}

/// `$PARKIT_CONFIG`, or `<config dir>/park-it/config.toml`.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("park-it")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.fares, FareRates::default());
        assert_eq!(cfg.facility.car_spots, 3);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [fares]
            car_rate_per_hour = 2.0

            [facility]
            bike_spots = 10
            "#,
        )
        .unwrap();
        assert_eq!(cfg.fares.car_rate_per_hour, 2.0);
        assert_eq!(cfg.fares.bike_rate_per_hour, 1.0);
        assert_eq!(cfg.fares.free_duration_secs, 1800);
        assert_eq!(cfg.facility.car_spots, 3);
        assert_eq!(cfg.facility.bike_spots, 10);
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = AppConfig::from_toml("[fares\ncar_rate_per_hour = ").unwrap_err();
        assert!(matches!(err, InfraError::Config(_)));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("parkit-config-that-does-not-exist.toml");
        let cfg = AppConfig::load(&path).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!("parkit-cfg-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");
        let mut cfg = AppConfig::default();
        cfg.logging.format = "json".to_string();
        cfg.facility.car_spots = 7;

        cfg.save(&path).unwrap();
        assert_eq!(AppConfig::load(&path).unwrap(), cfg);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn save_into_a_file_path_is_io_error() {
        let blocker = std::env::temp_dir().join(format!("parkit-blocker-{}", uuid::Uuid::new_v4()));
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = AppConfig::default()
            .save(&blocker.join("config.toml"))
            .unwrap_err();
        assert!(matches!(err, InfraError::Io(_)));

        let _ = std::fs::remove_file(blocker);
    }
}
