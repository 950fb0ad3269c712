//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, GeofenceConfig, PayrollSettings};

/// Loads and provides access to engine configuration.
///
/// # File Layout
///
/// ```text
/// currency: IDR
/// payroll:
///   model: monthly_aggregate
///   standard_minutes_per_day: 480
/// geofences:
///   check_in:
///     latitude: -6.2088
///     longitude: 106.8456
///     radius_meters: 100
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll.yaml").unwrap();
/// let fence = loader.geofence("check_in").unwrap();
/// println!("Check-in radius: {}m", fence.radius_meters);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or fails validation (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let loader = Self::from_yaml_str(&content, &path_str)?;
        debug!(
            path = %path_str,
            geofences = loader.config.geofences.len(),
            model = ?loader.config.payroll.model,
            "Loaded payroll configuration"
        );
        Ok(loader)
    }

    /// Parses configuration from an in-memory YAML document.
    ///
    /// `source` names the document in error messages.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::ConfigLoader;
    /// use payroll_engine::models::PayrollModel;
    ///
    /// let yaml = "payroll:\n  model: prorated\n";
    /// let loader = ConfigLoader::from_yaml_str(yaml, "inline").unwrap();
    /// assert_eq!(loader.payroll().model, PayrollModel::Prorated);
    /// ```
    pub fn from_yaml_str(content: &str, source: &str) -> EngineResult<Self> {
        let config: EngineConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: source.to_string(),
                message: e.to_string(),
            })?;

        Self::validate(&config).map_err(|message| EngineError::ConfigParseError {
            path: source.to_string(),
            message,
        })?;

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        Self::validate(&config).map_err(|message| EngineError::ConfigParseError {
            path: "<memory>".to_string(),
            message,
        })?;
        Ok(Self { config })
    }

    fn validate(config: &EngineConfig) -> Result<(), String> {
        if config.payroll.standard_minutes_per_day == 0 {
            return Err("payroll.standard_minutes_per_day must be positive".to_string());
        }

        for (name, fence) in &config.geofences {
            if !(fence.radius_meters.is_finite() && fence.radius_meters > 0.0) {
                return Err(format!("geofence '{}' must have a positive radius", name));
            }
            if fence.center().validate().is_err() {
                return Err(format!(
                    "geofence '{}' has an invalid centre ({}, {})",
                    name, fence.latitude, fence.longitude
                ));
            }
        }

        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the payroll settings.
    pub fn payroll(&self) -> &PayrollSettings {
        &self.config.payroll
    }

    /// Returns the configured currency code.
    pub fn currency(&self) -> &str {
        &self.config.currency
    }

    /// Gets a geofence by name.
    ///
    /// # Returns
    ///
    /// Returns the geofence if configured, or `GeofenceNotFound`.
    pub fn geofence(&self, name: &str) -> EngineResult<&GeofenceConfig> {
        self.config
            .geofences
            .get(name)
            .ok_or_else(|| EngineError::GeofenceNotFound {
                name: name.to_string(),
            })
    }
}
