//! The payroll calculator.
//!
//! [`compute_payroll`] combines attendance aggregation, base pay resolution
//! and claims summation into one [`PayrollLineItem`]. It is a pure function:
//! the same inputs always give the same line item.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, AuditStep, AuditWarning, EmploymentProfile, EmploymentType, LeaveRequest,
    PayPeriod, PayrollLineItem,
};

use super::attendance_hours::{AttendanceSummary, aggregate_attendance};
use super::base_pay::resolve_base_pay;
use super::claims::{ClaimsSummary, sum_approved_claims};

/// A line item together with the steps and warnings that produced it.
#[derive(Debug, Clone)]
pub struct PayrollCalculation {
    /// The computed line item.
    pub line_item: PayrollLineItem,
    /// The audit steps, in the order they were taken.
    pub audit_steps: Vec<AuditStep>,
    /// Inputs that were degraded to zero.
    pub warnings: Vec<AuditWarning>,
}

/// Computes one employee's payroll line item for a period.
///
/// `attendance` must hold the employee's records dated within `period`, and
/// `approved_claims` the employee's approved claims for the period. Open
/// attendance records contribute zero minutes. Missing pay figures and claim
/// amounts are treated as zero.
///
/// # Errors
///
/// Returns [`EngineError::AmountOverflow`] when hourly pay, the claim total
/// or net pay does not fit in a `Decimal`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_payroll;
/// use payroll_engine::models::{EmploymentProfile, EmploymentType, PayPeriod};
/// use payroll_engine::models::{AttendanceRecord, LeaveRequest};
/// use rust_decimal::Decimal;
///
/// let profile = EmploymentProfile {
///     employee_id: "emp_001".to_string(),
///     name: "Budi Santoso".to_string(),
///     employment_type: EmploymentType::FullTime,
///     base_salary: Some(Decimal::new(5_000_000, 0)),
///     hourly_rate: None,
/// };
/// let attendance: Vec<AttendanceRecord> = vec![];
/// let claims: Vec<LeaveRequest> = vec![];
/// let period = PayPeriod::new(2025, 3).unwrap();
///
/// let item = compute_payroll(&profile, &attendance, &claims, &period).unwrap();
/// assert_eq!(item.net_pay, Decimal::new(5_000_000, 0));
/// ```
pub fn compute_payroll<'a, A, C>(
    profile: &EmploymentProfile,
    attendance: A,
    approved_claims: C,
    period: &PayPeriod,
) -> EngineResult<PayrollLineItem>
where
    A: IntoIterator<Item = &'a AttendanceRecord>,
    C: IntoIterator<Item = &'a LeaveRequest>,
{
    compute_payroll_with_audit(profile, attendance, approved_claims, period, 1)
        .map(|calculation| calculation.line_item)
}

/// Computes a line item and keeps the audit steps and warnings.
///
/// Steps are numbered from `first_step`.
pub fn compute_payroll_with_audit<'a, A, C>(
    profile: &EmploymentProfile,
    attendance: A,
    approved_claims: C,
    period: &PayPeriod,
    first_step: u32,
) -> EngineResult<PayrollCalculation>
where
    A: IntoIterator<Item = &'a AttendanceRecord>,
    C: IntoIterator<Item = &'a LeaveRequest>,
{
    let employee_id = profile.employee_id.as_str();
    let mut audit_steps = Vec::with_capacity(4);

    let attendance_summary = aggregate_attendance(employee_id, attendance, first_step);
    let base_pay = resolve_base_pay(profile, attendance_summary.total_minutes, first_step + 1)?;
    let claims_summary = sum_approved_claims(employee_id, approved_claims, first_step + 2)?;

    let warnings = degraded_input_warnings(profile, period, &attendance_summary, &claims_summary);

    let net_pay = checked_net_pay(employee_id, base_pay.amount, claims_summary.total)?;

    audit_steps.push(attendance_summary.audit_step);
    audit_steps.push(base_pay.audit_step);
    audit_steps.push(claims_summary.audit_step);
    audit_steps.push(net_pay_step(
        employee_id,
        period,
        base_pay.amount,
        claims_summary.total,
        net_pay,
        first_step + 3,
    ));

    Ok(PayrollCalculation {
        line_item: PayrollLineItem {
            employee_id: profile.employee_id.clone(),
            name: profile.name.clone(),
            employment_type: profile.employment_type,
            base_salary: base_pay.amount,
            total_attendance_hours: attendance_summary.total_hours,
            approved_claims: claims_summary.total,
            net_pay,
        },
        audit_steps,
        warnings,
    })
}

/// `base_pay + claims`, or `AmountOverflow` for `employee_id`.
pub(super) fn checked_net_pay(
    employee_id: &str,
    base_pay: Decimal,
    claims: Decimal,
) -> EngineResult<Decimal> {
    base_pay
        .checked_add(claims)
        .ok_or_else(|| EngineError::amount_overflow(employee_id, "net pay"))
}

/// Flags inputs that were counted as zero instead of being rejected.
pub(super) fn degraded_input_warnings(
    profile: &EmploymentProfile,
    period: &PayPeriod,
    attendance: &AttendanceSummary,
    claims: &ClaimsSummary,
) -> Vec<AuditWarning> {
    let employee_id = profile.employee_id.as_str();
    let mut warnings = Vec::new();

    if profile.is_missing_pay_figure() {
        let figure = match profile.employment_type {
            EmploymentType::FullTime => "base salary",
            EmploymentType::PartTime => "hourly rate",
        };
        warnings.push(AuditWarning::new(
            "MISSING_PAY_FIGURE",
            format!(
                "Employee '{}' has no {} on record; base pay counted as zero",
                employee_id, figure
            ),
            "medium",
        ));
    }
    if attendance.open_records > 0 {
        warnings.push(AuditWarning::new(
            "OPEN_ATTENDANCE",
            format!(
                "Employee '{}' has {} attendance record(s) without check-out in {}",
                employee_id, attendance.open_records, period
            ),
            "low",
        ));
    }
    if claims.missing_amounts > 0 {
        warnings.push(AuditWarning::new(
            "CLAIM_WITHOUT_AMOUNT",
            format!(
                "Employee '{}' has {} approved claim(s) without an amount",
                employee_id, claims.missing_amounts
            ),
            "medium",
        ));
    }

    warnings
}

pub(super) fn net_pay_step(
    employee_id: &str,
    period: &PayPeriod,
    base_pay: Decimal,
    claims: Decimal,
    net_pay: Decimal,
    step_number: u32,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        employee_id: employee_id.to_string(),
        input: serde_json::json!({
            "period": period.to_string(),
            "base_salary": base_pay.normalize().to_string(),
            "approved_claims": claims.normalize().to_string()
        }),
        output: serde_json::json!({
            "net_pay": net_pay.normalize().to_string()
        }),
        reasoning: format!(
            "{} base + {} claims = {}",
            base_pay.normalize(),
            claims.normalize(),
            net_pay.normalize()
        ),
    }
}
