//! Leave, sick and expense-claim requests.
//!
//! This module defines the [`LeaveRequest`] struct along with its
//! [`RequestType`] and [`RequestStatus`] enums. Requests start `pending` and
//! move exactly once to `approved` or `rejected`.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::PayPeriod;

/// The kind of request an employee submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    /// Paid leave.
    Leave,
    /// Sick day.
    Sick,
    /// Expense reimbursement.
    Claim,
}

/// The approval state of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting an administrator's decision.
    #[default]
    Pending,
    /// Approved by an administrator. Terminal.
    Approved,
    /// Rejected by an administrator. Terminal.
    Rejected,
}

impl RequestStatus {
    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }

    /// Returns true for states that accept no further transition.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

/// A leave, sick or claim request for a day range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: String,
    /// The employee that submitted the request.
    pub employee_id: String,
    /// What is being requested.
    #[serde(rename = "type")]
    pub request_type: RequestType,
    /// The approval state.
    #[serde(default)]
    pub status: RequestStatus,
    /// First day covered (inclusive).
    pub start_date: NaiveDate,
    /// Last day covered (inclusive).
    pub end_date: NaiveDate,
    /// The claimed amount. Only populated for claims.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Free-text reason supplied by the employee.
    #[serde(default)]
    pub reason: Option<String>,
}

impl LeaveRequest {
    /// Approves a pending request.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{LeaveRequest, RequestStatus, RequestType};
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    /// let mut request = LeaveRequest {
    ///     id: "req_1".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     request_type: RequestType::Sick,
    ///     status: RequestStatus::Pending,
    ///     start_date: day,
    ///     end_date: day,
    ///     amount: None,
    ///     reason: None,
    /// };
    ///
    /// request.approve().unwrap();
    /// assert_eq!(request.status, RequestStatus::Approved);
    /// assert!(request.reject().is_err());
    /// ```
    pub fn approve(&mut self) -> EngineResult<()> {
        self.transition(RequestStatus::Approved)
    }

    /// Rejects a pending request.
    pub fn reject(&mut self) -> EngineResult<()> {
        self.transition(RequestStatus::Rejected)
    }

    fn transition(&mut self, to: RequestStatus) -> EngineResult<()> {
        if self.status.is_terminal() {
            return Err(EngineError::InvalidTransition {
                request_id: self.id.clone(),
                from: self.status.as_str().to_string(),
                to: to.as_str().to_string(),
            });
        }
        self.status = to;
        Ok(())
    }

    /// Returns true for approved expense claims.
    pub fn is_approved_claim(&self) -> bool {
        self.request_type == RequestType::Claim && self.status == RequestStatus::Approved
    }

    /// Returns true for approved leave or sick days.
    pub fn is_approved_absence(&self) -> bool {
        matches!(self.request_type, RequestType::Leave | RequestType::Sick)
            && self.status == RequestStatus::Approved
    }

    /// Iterates over the days of this request that fall inside `period`.
    ///
    /// A request whose end precedes its start covers no days.
    pub fn dates_within(&self, period: &PayPeriod) -> impl Iterator<Item = NaiveDate> {
        let start = self.start_date.max(period.start_date());
        let end = self.end_date.min(period.end_date());
        start.iter_days().take_while(move |d| *d <= end)
    }

    /// Iterates over the Monday-to-Friday days of this request inside `period`.
    pub fn working_dates_within(&self, period: &PayPeriod) -> impl Iterator<Item = NaiveDate> {
        self.dates_within(period)
            .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
    }
}
