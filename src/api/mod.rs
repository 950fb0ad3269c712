//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for running payroll, exporting it
//! as CSV, and verifying check-in positions against configured geofences.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{GeofenceVerifyRequest, PayPeriodRequest, PayrollRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
