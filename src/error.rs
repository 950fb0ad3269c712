//! Error types for the Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for configuration loading, record state changes, geofence checks, and
//! money figures that overflow.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Payroll Engine.
///
/// The payroll calculation degrades missing inputs to zero and fails only
/// when an amount overflows. The other errors come from the surrounding
/// operations.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/payroll.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/payroll.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or failed validation.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A pay period did not name a real calendar month.
    #[error("Invalid pay period {year}-{month:02}: month must be between 1 and 12")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// An attendance record could not be opened or closed.
    #[error("Invalid attendance for employee '{employee_id}' on {date}: {message}")]
    InvalidAttendance {
        /// The employee owning the record.
        employee_id: String,
        /// The calendar day of the record.
        date: NaiveDate,
        /// What made the change invalid.
        message: String,
    },

    /// A leave request was asked to move out of a terminal state.
    #[error("Request '{request_id}' cannot move from {from} to {to}")]
    InvalidTransition {
        /// The ID of the request.
        request_id: String,
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },

    /// A coordinate was outside the valid latitude/longitude range.
    #[error("Invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate {
        /// Latitude in degrees.
        latitude: f64,
        /// Longitude in degrees.
        longitude: f64,
    },

    /// No geofence with the given name is configured.
    #[error("Geofence not found: {name}")]
    GeofenceNotFound {
        /// The requested geofence name.
        name: String,
    },

    /// A position was farther from the geofence centre than its radius.
    #[error(
        "Position is {distance_meters:.1}m from geofence '{geofence}', outside the {radius_meters}m radius"
    )]
    OutsideGeofence {
        /// The geofence that rejected the position.
        geofence: String,
        /// The measured distance in metres.
        distance_meters: f64,
        /// The configured radius in metres.
        radius_meters: f64,
    },

    /// A money figure grew beyond what a decimal amount can hold.
    #[error("Amount overflow for employee '{employee_id}' while computing {operation}")]
    AmountOverflow {
        /// The employee whose figures overflowed.
        employee_id: String,
        /// The figure being computed.
        operation: String,
    },
}

impl EngineError {
    /// Builds an [`EngineError::AmountOverflow`].
    pub fn amount_overflow(employee_id: &str, operation: &str) -> Self {
        EngineError::AmountOverflow {
            employee_id: employee_id.to_string(),
            operation: operation.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
