//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type: a closed calendar month that
//! bounds the attendance and claims aggregated by a payroll run.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents a payroll period identified by `(year, month)`.
///
/// The period runs from the first to the last day of the month, both inclusive.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(2024, 2).unwrap();
/// assert_eq!(period.start_date(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert_eq!(period.end_date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPayPeriod")]
pub struct PayPeriod {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawPayPeriod {
    year: i32,
    month: u32,
}

impl TryFrom<RawPayPeriod> for PayPeriod {
    type Error = EngineError;

    fn try_from(raw: RawPayPeriod) -> EngineResult<Self> {
        PayPeriod::new(raw.year, raw.month)
    }
}

impl PayPeriod {
    /// Creates a pay period for the given month.
    ///
    /// Returns `InvalidPeriod` if `month` is not in `1..=12` or the year is
    /// outside the range chrono can represent.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(EngineError::InvalidPeriod { year, month });
        }
        // The last day is computed from the following month's first day.
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        if NaiveDate::from_ymd_opt(next_year, next_month, 1).is_none() {
            return Err(EngineError::InvalidPeriod { year, month });
        }
        Ok(Self { year, month })
    }

    /// Returns the period's year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the period's month (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the first day of the month.
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// Returns the last day of the month.
    pub fn end_date(&self) -> NaiveDate {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Checks if a given date falls within this pay period (inclusive).
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::PayPeriod;
    /// use chrono::NaiveDate;
    ///
    /// let period = PayPeriod::new(2025, 1).unwrap();
    /// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
    /// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()));
    /// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()));
    /// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()));
    /// ```
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Counts the Monday-to-Friday days in the month.
    pub fn working_days(&self) -> u32 {
        self.start_date()
            .iter_days()
            .take_while(|d| *d <= self.end_date())
            .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
            .count() as u32
    }
}

impl std::fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}
