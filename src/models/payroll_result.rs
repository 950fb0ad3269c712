//! Payroll result models for the Payroll Engine.
//!
//! This module contains the [`PayrollLineItem`] produced per employee, the
//! [`PayrollRunResult`] that wraps a batch of line items, and the audit types
//! that record how each figure was reached.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::{EmploymentType, PayPeriod};

/// Selects how base pay is derived from attendance.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollModel;
///
/// assert_eq!(PayrollModel::default(), PayrollModel::MonthlyAggregate);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollModel {
    /// Full-time staff receive their monthly salary as-is; part-time staff
    /// are paid hours worked times their hourly rate.
    #[default]
    MonthlyAggregate,
    /// Worked minutes minus approved leave minutes, pro-rated against the
    /// month's expected working minutes.
    Prorated,
}

/// One employee's payroll figures for a period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{EmploymentType, PayrollLineItem};
/// use rust_decimal::Decimal;
///
/// let item = PayrollLineItem {
///     employee_id: "emp_001".to_string(),
///     name: "Budi Santoso".to_string(),
///     employment_type: EmploymentType::FullTime,
///     base_salary: Decimal::new(5_000_000, 0),
///     total_attendance_hours: Decimal::new(16, 0),
///     approved_claims: Decimal::new(100_000, 0),
///     net_pay: Decimal::new(5_100_000, 0),
/// };
/// assert_eq!(item.net_pay, item.base_salary + item.approved_claims);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollLineItem {
    /// The employee this line is for.
    pub employee_id: String,
    /// The employee's display name.
    pub name: String,
    /// The employment type the pay was resolved under.
    pub employment_type: EmploymentType,
    /// The resolved pay figure before claims.
    pub base_salary: Decimal,
    /// Worked minutes divided by 60, unrounded.
    pub total_attendance_hours: Decimal,
    /// Sum of approved claim amounts in the period.
    pub approved_claims: Decimal,
    /// `base_salary + approved_claims`.
    pub net_pay: Decimal,
}

/// Aggregated totals across every line item of a run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Number of line items.
    pub employee_count: u32,
    /// Sum of base pay.
    pub base_salary_total: Decimal,
    /// Sum of approved claims.
    pub claims_total: Decimal,
    /// Sum of net pay.
    pub net_pay_total: Decimal,
    /// Sum of attendance hours.
    pub attendance_hours_total: Decimal,
}

impl PayrollTotals {
    /// Sums the given line items.
    ///
    /// Returns `AmountOverflow`, naming the line item that tipped it over,
    /// when any running total exceeds the `Decimal` range.
    pub fn from_line_items(items: &[PayrollLineItem]) -> EngineResult<Self> {
        items.iter().try_fold(Self::default(), |totals, item| {
            let overflow = || EngineError::amount_overflow(&item.employee_id, "run totals");
            Ok(Self {
                employee_count: totals.employee_count + 1,
                base_salary_total: totals
                    .base_salary_total
                    .checked_add(item.base_salary)
                    .ok_or_else(overflow)?,
                claims_total: totals
                    .claims_total
                    .checked_add(item.approved_claims)
                    .ok_or_else(overflow)?,
                net_pay_total: totals
                    .net_pay_total
                    .checked_add(item.net_pay)
                    .ok_or_else(overflow)?,
                attendance_hours_total: totals
                    .attendance_hours_total
                    .checked_add(item.total_attendance_hours)
                    .ok_or_else(overflow)?,
            })
        })
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The employee the step concerns.
    pub employee_id: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag inputs that were degraded to zero rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a payroll run over many employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRunResult {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the run.
    pub engine_version: String,
    /// The month the run covers.
    pub period: PayPeriod,
    /// The base pay model used.
    pub model: PayrollModel,
    /// One line per employee, in input order.
    pub line_items: Vec<PayrollLineItem>,
    /// Aggregated totals.
    pub totals: PayrollTotals,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_line_item(id: &str, base: &str, hours: &str, claims: &str) -> PayrollLineItem {
        PayrollLineItem {
            employee_id: id.to_string(),
            name: format!("Employee {}", id),
            employment_type: EmploymentType::FullTime,
            base_salary: dec(base),
            total_attendance_hours: dec(hours),
            approved_claims: dec(claims),
            net_pay: dec(base) + dec(claims),
        }
    }

    #[test]
    fn test_totals_sum_every_line_item() {
        let items = vec![
            create_line_item("emp_001", "5000000", "16", "100000"),
            create_line_item("emp_002", "450000", "9", "0"),
            create_line_item("emp_003", "3250000.50", "120.5", "25000.25"),
        ];

        let totals = PayrollTotals::from_line_items(&items).unwrap();
        assert_eq!(totals.employee_count, 3);
        assert_eq!(totals.base_salary_total, dec("8700000.50"));
        assert_eq!(totals.claims_total, dec("125000.25"));
        assert_eq!(totals.net_pay_total, dec("8825000.75"));
        assert_eq!(totals.attendance_hours_total, dec("145.5"));
    }

    #[test]
    fn test_totals_of_empty_run_are_zero() {
        let totals = PayrollTotals::from_line_items(&[]).unwrap();
        assert_eq!(totals, PayrollTotals::default());
        assert_eq!(totals.net_pay_total, Decimal::ZERO);
    }

    #[test]
    fn test_totals_beyond_decimal_range_name_the_line_item() {
        let items = vec![
            create_line_item("emp_001", "40000000000000000000000000000", "8", "0"),
            create_line_item("emp_002", "40000000000000000000000000000", "8", "0"),
        ];

        match PayrollTotals::from_line_items(&items) {
            Err(EngineError::AmountOverflow {
                employee_id,
                operation,
            }) => {
                assert_eq!(employee_id, "emp_002");
                assert_eq!(operation, "run totals");
            }
            other => panic!("Expected AmountOverflow, got {:?}", other),
        }
    }

    #[test]
    fn test_line_item_serializes_money_as_strings() {
        let item = create_line_item("emp_001", "5000000", "16", "100000");
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"employee_id\":\"emp_001\""));
        assert!(json.contains("\"employment_type\":\"full_time\""));
        assert!(json.contains("\"base_salary\":\"5000000\""));
        assert!(json.contains("\"net_pay\":\"5100000\""));
    }

    #[test]
    fn test_payroll_model_serialization() {
        assert_eq!(
            serde_json::to_string(&PayrollModel::MonthlyAggregate).unwrap(),
            "\"monthly_aggregate\""
        );
        let model: PayrollModel = serde_json::from_str("\"prorated\"").unwrap();
        assert_eq!(model, PayrollModel::Prorated);
    }

    #[test]
    fn test_run_result_roundtrips_through_json() {
        let result = PayrollRunResult {
            run_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: "0.1.0".to_string(),
            period: PayPeriod::new(2025, 3).unwrap(),
            model: PayrollModel::MonthlyAggregate,
            line_items: vec![create_line_item("emp_001", "5000000", "16", "100000")],
            totals: PayrollTotals::default(),
            audit_trace: AuditTrace {
                steps: vec![],
                warnings: vec![AuditWarning::new(
                    "OPEN_ATTENDANCE",
                    "1 open attendance record",
                    "low",
                )],
                duration_us: 12,
            },
        };

        let json = serde_json::to_string(&result).unwrap();
        let back: PayrollRunResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }
}
