//! Payroll runs over many employees.
//!
//! [`run_payroll`] selects each employee's attendance and requests for the
//! period, computes their line item with the configured model, and collects
//! the totals and audit trace into a [`PayrollRunResult`].

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::PayrollSettings;
use crate::error::EngineResult;
use crate::models::{
    AttendanceRecord, AuditStep, AuditTrace, AuditWarning, EmploymentProfile, LeaveRequest,
    PayPeriod, PayrollLineItem, PayrollModel, PayrollRunResult, PayrollTotals,
};

use super::attendance_hours::select_attendance;
use super::claims::select_approved_claims;
use super::payroll::{PayrollCalculation, compute_payroll_with_audit};
use super::prorated::compute_prorated_payroll;

/// Computes payroll for every profile in `profiles`.
///
/// `attendance` and `requests` may hold rows for any employee and any date;
/// rows outside `period` or for unknown employees are ignored. Line items
/// come back in the order of `profiles`.
///
/// # Errors
///
/// Returns [`EngineError::AmountOverflow`](crate::error::EngineError::AmountOverflow)
/// if any employee's figures or the run totals exceed the `Decimal` range.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::run_payroll;
/// use payroll_engine::config::PayrollSettings;
/// use payroll_engine::models::{EmploymentProfile, EmploymentType, PayPeriod};
/// use rust_decimal::Decimal;
///
/// let profiles = vec![EmploymentProfile {
///     employee_id: "emp_001".to_string(),
///     name: "Budi Santoso".to_string(),
///     employment_type: EmploymentType::FullTime,
///     base_salary: Some(Decimal::new(5_000_000, 0)),
///     hourly_rate: None,
/// }];
/// let period = PayPeriod::new(2025, 3).unwrap();
///
/// let run = run_payroll(&period, &profiles, &[], &[], &PayrollSettings::default()).unwrap();
/// assert_eq!(run.line_items.len(), 1);
/// assert_eq!(run.totals.net_pay_total, Decimal::new(5_000_000, 0));
/// ```
pub fn run_payroll(
    period: &PayPeriod,
    profiles: &[EmploymentProfile],
    attendance: &[AttendanceRecord],
    requests: &[LeaveRequest],
    settings: &PayrollSettings,
) -> EngineResult<PayrollRunResult> {
    let start_time = Instant::now();
    let mut line_items: Vec<PayrollLineItem> = Vec::with_capacity(profiles.len());
    let mut all_audit_steps: Vec<AuditStep> = Vec::new();
    let mut all_warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    for profile in profiles {
        let employee_id = profile.employee_id.as_str();
        let records = select_attendance(attendance, employee_id, period);
        let claims = select_approved_claims(requests, employee_id, period);

        let calculation: PayrollCalculation = match settings.model {
            PayrollModel::MonthlyAggregate => {
                compute_payroll_with_audit(profile, records, claims, period, step_number)?
            }
            PayrollModel::Prorated => {
                let absences = requests.iter().filter(|r| r.employee_id == employee_id);
                compute_prorated_payroll(
                    profile,
                    records,
                    absences,
                    claims,
                    period,
                    settings,
                    step_number,
                )?
            }
        };

        debug!(
            employee_id = %employee_id,
            net_pay = %calculation.line_item.net_pay,
            warnings = calculation.warnings.len(),
            "Computed payroll line item"
        );

        step_number += calculation.audit_steps.len() as u32;
        all_audit_steps.extend(calculation.audit_steps);
        all_warnings.extend(calculation.warnings);
        line_items.push(calculation.line_item);
    }

    let totals = PayrollTotals::from_line_items(&line_items)?;
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        period = %period,
        model = ?settings.model,
        employees = totals.employee_count,
        net_pay_total = %totals.net_pay_total,
        warnings = all_warnings.len(),
        duration_us,
        "Payroll run completed"
    );

    Ok(PayrollRunResult {
        run_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        period: *period,
        model: settings.model,
        line_items,
        totals,
        audit_trace: AuditTrace {
            steps: all_audit_steps,
            warnings: all_warnings,
            duration_us,
        },
    })
}
