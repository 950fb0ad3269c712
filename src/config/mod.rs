//! Configuration loading and management for the Payroll Engine.
//!
//! This module loads the engine configuration from a YAML file: the payroll
//! model, the standard working day, and the named geofences used to gate
//! check-in.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! println!("Payroll model: {:?}", config.payroll().model);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CHECK_IN_GEOFENCE, EngineConfig, GeofenceConfig, OFFICE_PRESENCE_GEOFENCE, PayrollSettings,
};
