//! Attendance record model.
//!
//! This module defines the [`AttendanceRecord`] struct: one row per employee
//! per calendar day, opened at check-in and closed at check-out.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Represents one day of attendance for an employee.
///
/// `total_minutes` is fixed when the record is closed. A record without a
/// check-out is an incomplete shift and is worth zero minutes to payroll,
/// whatever value `total_minutes` happens to hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee that owns the record.
    pub employee_id: String,
    /// The calendar day the record tracks.
    pub date: NaiveDate,
    /// When the employee checked in, if they have.
    #[serde(default)]
    pub check_in: Option<NaiveDateTime>,
    /// When the employee checked out, if they have.
    #[serde(default)]
    pub check_out: Option<NaiveDateTime>,
    /// Minutes worked, computed at check-out.
    #[serde(default)]
    pub total_minutes: u32,
}

impl AttendanceRecord {
    /// Opens a record for the day of `check_in`.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::AttendanceRecord;
    /// use chrono::NaiveDateTime;
    ///
    /// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
    /// let mut record = AttendanceRecord::check_in_at("emp_001", at("2025-03-04 08:00:00"));
    /// assert!(!record.is_complete());
    ///
    /// record.check_out_at(at("2025-03-04 16:30:29")).unwrap();
    /// assert_eq!(record.total_minutes, 510);
    /// ```
    pub fn check_in_at(employee_id: impl Into<String>, check_in: NaiveDateTime) -> Self {
        Self {
            employee_id: employee_id.into(),
            date: check_in.date(),
            check_in: Some(check_in),
            check_out: None,
            total_minutes: 0,
        }
    }

    /// Closes the record and computes `total_minutes`.
    ///
    /// The duration is rounded to the nearest minute, with exactly half a
    /// minute rounding up.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAttendance` if the record has no check-in, is already
    /// closed, or `check_out` is earlier than the check-in.
    pub fn check_out_at(&mut self, check_out: NaiveDateTime) -> EngineResult<u32> {
        let check_in = self.check_in.ok_or_else(|| self.invalid("no check-in recorded"))?;
        if self.check_out.is_some() {
            return Err(self.invalid("already checked out"));
        }

        let elapsed_ms = (check_out - check_in).num_milliseconds();
        if elapsed_ms < 0 {
            return Err(self.invalid("check-out is earlier than check-in"));
        }

        let minutes = (elapsed_ms + MILLIS_PER_MINUTE / 2) / MILLIS_PER_MINUTE;
        let minutes = u32::try_from(minutes).map_err(|_| self.invalid("shift is too long"))?;

        self.check_out = Some(check_out);
        self.total_minutes = minutes;
        Ok(minutes)
    }

    /// Returns true once the employee has checked out.
    pub fn is_complete(&self) -> bool {
        self.check_out.is_some()
    }

    /// Returns the minutes this record contributes to payroll.
    ///
    /// Incomplete records contribute nothing.
    pub fn payable_minutes(&self) -> u32 {
        if self.is_complete() {
            self.total_minutes
        } else {
            0
        }
    }

    fn invalid(&self, message: &str) -> EngineError {
        EngineError::InvalidAttendance {
            employee_id: self.employee_id.clone(),
            date: self.date,
            message: message.to_string(),
        }
    }
}
