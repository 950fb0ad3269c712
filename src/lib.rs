//! Payroll Engine for monthly and hourly employees
//!
//! This crate computes per-employee payroll line items from employment
//! profiles, daily attendance records and approved expense claims, exports
//! them as CSV, and checks attendance positions against configured geofences.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
