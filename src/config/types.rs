//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::models::{Coordinate, PayrollModel};

/// Name of the geofence that gates attendance check-in.
pub const CHECK_IN_GEOFENCE: &str = "check_in";

/// Name of the wider geofence used for office presence.
pub const OFFICE_PRESENCE_GEOFENCE: &str = "office_presence";

fn default_currency() -> String {
    "IDR".to_string()
}

fn default_standard_minutes_per_day() -> u32 {
    480
}

/// Payroll calculation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PayrollSettings {
    /// Which base pay model a run uses.
    #[serde(default)]
    pub model: PayrollModel,
    /// Length of a standard working day, used by the prorated model to turn
    /// leave days and working days into minutes.
    #[serde(default = "default_standard_minutes_per_day")]
    pub standard_minutes_per_day: u32,
}

impl Default for PayrollSettings {
    fn default() -> Self {
        Self {
            model: PayrollModel::default(),
            standard_minutes_per_day: default_standard_minutes_per_day(),
        }
    }
}

/// A circular area around a fixed coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GeofenceConfig {
    /// Latitude of the centre in degrees.
    pub latitude: f64,
    /// Longitude of the centre in degrees.
    pub longitude: f64,
    /// Radius in metres. Positions farther than this are rejected.
    pub radius_meters: f64,
}

impl GeofenceConfig {
    /// Creates a geofence around a point.
    pub fn new(latitude: f64, longitude: f64, radius_meters: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius_meters,
        }
    }

    /// Returns the geofence centre.
    pub fn center(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// The complete engine configuration loaded from YAML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// ISO currency code used when presenting amounts.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Payroll calculation settings.
    #[serde(default)]
    pub payroll: PayrollSettings,
    /// Named geofences, e.g. `check_in` and `office_presence`.
    #[serde(default)]
    pub geofences: BTreeMap<String, GeofenceConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            payroll: PayrollSettings::default(),
            geofences: BTreeMap::new(),
        }
    }
}
