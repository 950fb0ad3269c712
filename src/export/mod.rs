//! Export formats for payroll results.

mod csv;

pub use csv::{CSV_HEADER, payroll_to_csv};
