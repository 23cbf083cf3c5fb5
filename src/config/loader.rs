//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{BookingError, BookingResult};

use super::types::{AuthConfig, BookingConfig, ServiceConfig, SheetConfig};

/// Loads and provides access to the service configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── service.yaml   # Service name and bind address
/// ├── sheet.yaml     # Sheet endpoint URL, timeout and cache TTL
/// └── auth.yaml      # Accepted bearer tokens
/// ```
///
/// # Example
///
/// ```no_run
/// use commission_booking::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Sheet endpoint: {}", loader.config().sheet().base_url);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: BookingConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any file is missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> BookingResult<Self> {
        let path = path.as_ref();

        let service = Self::load_yaml::<ServiceConfig>(&path.join("service.yaml"))?;
        let sheet = Self::load_yaml::<SheetConfig>(&path.join("sheet.yaml"))?;
        let auth = Self::load_yaml::<AuthConfig>(&path.join("auth.yaml"))?;

        Ok(Self {
            config: BookingConfig::new(service, sheet, auth),
        })
    }

    /// Wraps an already assembled configuration.
    pub fn from_config(config: BookingConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> BookingResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| BookingError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| BookingError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &BookingConfig {
        &self.config
    }
}
