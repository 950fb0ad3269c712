//! The payable-minutes payroll model.
//!
//! Under this model base pay follows the minutes an employee was actually
//! present, less approved leave:
//!
//! - `payable = max(0, worked - approved_leave_minutes)`
//! - `expected = working_days * standard_minutes_per_day`
//! - full-time: `base_salary * payable / expected` (zero when nothing is expected)
//! - part-time: `payable / 60 * hourly_rate`
//!
//! It is selected with [`PayrollModel::Prorated`](crate::models::PayrollModel)
//! and never mixed with the monthly aggregate model inside one run.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::PayrollSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, AuditStep, Compensation, EmploymentProfile, LeaveRequest, PayPeriod,
    PayrollLineItem,
};

use super::attendance_hours::{MINUTES_PER_HOUR, aggregate_attendance, minutes_to_hours};
use super::claims::sum_approved_claims;
use super::payroll::{PayrollCalculation, checked_net_pay, degraded_input_warnings, net_pay_step};

/// The result of a prorated base pay calculation.
#[derive(Debug, Clone)]
pub struct ProratedBasePay {
    /// Minutes from closed attendance records.
    pub worked_minutes: u64,
    /// Minutes of approved leave and sick days deducted from worked minutes.
    pub approved_leave_minutes: u64,
    /// `max(0, worked - leave)`.
    pub payable_minutes: u64,
    /// Working days in the period times the standard day.
    pub expected_minutes: u64,
    /// The resulting base pay.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Sums the approved leave and sick minutes of `requests` inside `period`.
///
/// Only requests that are approved absences count; claims and undecided
/// requests are skipped. Each weekday covered by at least one request counts
/// one standard day, so overlapping requests deduct a shared day once.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::approved_leave_minutes;
/// use payroll_engine::models::{LeaveRequest, PayPeriod, RequestStatus, RequestType};
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(2025, 3).unwrap();
/// let leave = LeaveRequest {
///     id: "req_1".to_string(),
///     employee_id: "emp_001".to_string(),
///     request_type: RequestType::Leave,
///     status: RequestStatus::Approved,
///     start_date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
///     amount: None,
///     reason: None,
/// };
///
/// assert_eq!(approved_leave_minutes(&[leave], &period, 480), 960);
/// ```
pub fn approved_leave_minutes<'a, I>(
    requests: I,
    period: &PayPeriod,
    standard_minutes_per_day: u32,
) -> u64
where
    I: IntoIterator<Item = &'a LeaveRequest>,
{
    let leave_days: BTreeSet<NaiveDate> = requests
        .into_iter()
        .filter(|r| r.is_approved_absence())
        .flat_map(|r| r.working_dates_within(period))
        .collect();
    leave_days.len() as u64 * u64::from(standard_minutes_per_day)
}

/// Computes base pay from payable minutes.
///
/// A full-time employee in a period with no working days is paid zero.
///
/// # Errors
///
/// Returns [`EngineError::AmountOverflow`] when salary or rate times payable
/// minutes does not fit in a `Decimal`.
pub fn compute_prorated_base_pay(
    profile: &EmploymentProfile,
    worked_minutes: u64,
    approved_leave_minutes: u64,
    period: &PayPeriod,
    settings: &PayrollSettings,
    step_number: u32,
) -> EngineResult<ProratedBasePay> {
    let payable_minutes = worked_minutes.saturating_sub(approved_leave_minutes);
    let expected_minutes =
        u64::from(period.working_days()) * u64::from(settings.standard_minutes_per_day);
    let overflow = || EngineError::amount_overflow(&profile.employee_id, "prorated base pay");

    let (amount, reasoning) = match profile.compensation() {
        Compensation::Monthly { salary } => {
            if expected_minutes == 0 {
                (
                    Decimal::ZERO,
                    format!("No working minutes expected in {}; base pay is zero", period),
                )
            } else {
                let amount = salary
                    .checked_mul(Decimal::from(payable_minutes))
                    .ok_or_else(overflow)?
                    / Decimal::from(expected_minutes);
                (
                    amount,
                    format!(
                        "{} x {} / {} payable minutes = {}",
                        salary.normalize(),
                        payable_minutes,
                        expected_minutes,
                        amount.normalize()
                    ),
                )
            }
        }
        Compensation::Hourly { rate } => {
            let amount = Decimal::from(payable_minutes)
                .checked_mul(rate)
                .ok_or_else(overflow)?
                / MINUTES_PER_HOUR;
            (
                amount,
                format!(
                    "{} payable hours x {} per hour = {}",
                    minutes_to_hours(payable_minutes).normalize(),
                    rate.normalize(),
                    amount.normalize()
                ),
            )
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "prorated_base_pay".to_string(),
        rule_name: "Prorated Base Pay".to_string(),
        employee_id: profile.employee_id.clone(),
        input: serde_json::json!({
            "employment_type": profile.employment_type,
            "worked_minutes": worked_minutes,
            "approved_leave_minutes": approved_leave_minutes,
            "working_days": period.working_days(),
            "standard_minutes_per_day": settings.standard_minutes_per_day
        }),
        output: serde_json::json!({
            "payable_minutes": payable_minutes,
            "expected_minutes": expected_minutes,
            "amount": amount.normalize().to_string()
        }),
        reasoning,
    };

    Ok(ProratedBasePay {
        worked_minutes,
        approved_leave_minutes,
        payable_minutes,
        expected_minutes,
        amount,
        audit_step,
    })
}

/// Computes a line item under the payable-minutes model.
///
/// `absences` are the employee's leave and sick requests; only approved ones
/// are deducted. `approved_claims` are added to net pay exactly as in
/// [`compute_payroll`](super::compute_payroll), and overflow is reported the
/// same way.
pub fn compute_prorated_payroll<'a, A, L, C>(
    profile: &EmploymentProfile,
    attendance: A,
    absences: L,
    approved_claims: C,
    period: &PayPeriod,
    settings: &PayrollSettings,
    first_step: u32,
) -> EngineResult<PayrollCalculation>
where
    A: IntoIterator<Item = &'a AttendanceRecord>,
    L: IntoIterator<Item = &'a LeaveRequest>,
    C: IntoIterator<Item = &'a LeaveRequest>,
{
    let employee_id = profile.employee_id.as_str();

    let attendance_summary = aggregate_attendance(employee_id, attendance, first_step);
    let leave_minutes =
        approved_leave_minutes(absences, period, settings.standard_minutes_per_day);
    let base_pay = compute_prorated_base_pay(
        profile,
        attendance_summary.total_minutes,
        leave_minutes,
        period,
        settings,
        first_step + 1,
    )?;
    let claims_summary = sum_approved_claims(employee_id, approved_claims, first_step + 2)?;

    let warnings = degraded_input_warnings(profile, period, &attendance_summary, &claims_summary);

    let net_pay = checked_net_pay(employee_id, base_pay.amount, claims_summary.total)?;
    let audit_steps = vec![
        attendance_summary.audit_step,
        base_pay.audit_step,
        claims_summary.audit_step,
        net_pay_step(
            employee_id,
            period,
            base_pay.amount,
            claims_summary.total,
            net_pay,
            first_step + 3,
        ),
    ];

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
