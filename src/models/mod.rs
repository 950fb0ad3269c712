//! Core data models for the Payroll Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod coordinate;
mod employee;
mod leave_request;
mod pay_period;
mod payroll_result;

pub use attendance::AttendanceRecord;
pub use coordinate::Coordinate;
pub use employee::{Compensation, EmploymentProfile, EmploymentType};
pub use leave_request::{LeaveRequest, RequestStatus, RequestType};
pub use pay_period::PayPeriod;
pub use payroll_result::{
    AuditStep, AuditTrace, AuditWarning, PayrollLineItem, PayrollModel, PayrollRunResult,
    PayrollTotals,
};
