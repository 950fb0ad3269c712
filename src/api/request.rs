//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for the `/payroll` and
//! `/geofence/{name}/verify` endpoints.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, Coordinate, EmploymentProfile, LeaveRequest, PayPeriod};

/// Request body for the `/payroll` and `/payroll/csv` endpoints.
///
/// Attendance and requests may cover any employee and any date; the engine
/// picks out the rows relevant to each employee and the period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The month to run payroll for.
    pub period: PayPeriodRequest,
    /// The employees to pay.
    pub employees: Vec<EmploymentProfile>,
    /// Attendance records.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
    /// Leave, sick and claim requests.
    #[serde(default)]
    pub requests: Vec<LeaveRequest>,
}

/// Pay period information in a payroll request.
///
/// Kept unvalidated at parse time so that an out-of-range month is reported
/// as `INVALID_PERIOD` rather than a JSON error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PayPeriodRequest {
    /// The calendar year.
    pub year: i32,
    /// The month, 1-12.
    pub month: u32,
}

impl TryFrom<PayPeriodRequest> for PayPeriod {
    type Error = EngineError;

    fn try_from(req: PayPeriodRequest) -> EngineResult<Self> {
        PayPeriod::new(req.year, req.month)
    }
}

/// Request body for the `/geofence/{name}/verify` endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeofenceVerifyRequest {
    /// Latitude of the device in degrees.
    pub latitude: f64,
    /// Longitude of the device in degrees.
    pub longitude: f64,
}

impl From<GeofenceVerifyRequest> for Coordinate {
    fn from(req: GeofenceVerifyRequest) -> Self {
        Coordinate {
            latitude: req.latitude,
            longitude: req.longitude,
        }
    }
}
