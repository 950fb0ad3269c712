//! Calculation logic for the payroll engine.
//!
//! This module contains the payroll calculator and its building blocks:
//! attendance aggregation, base pay resolution, approved-claim summation, the
//! alternate payable-minutes model, multi-employee payroll runs, and the
//! haversine distance behind geofenced check-in.

mod attendance_hours;
mod base_pay;
mod claims;
mod geofence;
mod payroll;
mod payroll_run;
mod prorated;

pub use attendance_hours::{
    AttendanceSummary, MINUTES_PER_HOUR, aggregate_attendance, minutes_to_hours,
    select_attendance,
};
pub use base_pay::{BasePayResult, resolve_base_pay};
pub use claims::{ClaimsSummary, select_approved_claims, sum_approved_claims};
pub use geofence::{
    EARTH_RADIUS_METERS, GeofenceCheck, check_geofence, haversine_distance_meters,
    verify_geofence,
};
pub use payroll::{PayrollCalculation, compute_payroll, compute_payroll_with_audit};
pub use payroll_run::run_payroll;
pub use prorated::{
    ProratedBasePay, approved_leave_minutes, compute_prorated_base_pay, compute_prorated_payroll,
};
