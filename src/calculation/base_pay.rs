//! Base pay resolution.
//!
//! This module turns an employee's compensation and worked minutes into the
//! pay figure before claims. Full-time employees receive their monthly salary
//! unchanged; part-time employees are paid for the minutes they worked.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Compensation, EmploymentProfile};

use super::attendance_hours::{MINUTES_PER_HOUR, minutes_to_hours};

/// The result of resolving base pay, including the audit step.
#[derive(Debug, Clone)]
pub struct BasePayResult {
    /// The resolved base pay for the period.
    pub amount: Decimal,
    /// The compensation the amount was derived from.
    pub compensation: Compensation,
    /// The audit step recording this resolution.
    pub audit_step: AuditStep,
}

/// Resolves an employee's base pay for a period.
///
/// - `Monthly { salary }`: `salary`, whatever `worked_minutes` is.
/// - `Hourly { rate }`: `worked_minutes / 60 * rate`.
///
/// A missing pay figure resolves to zero. The only failure is
/// [`EngineError::AmountOverflow`] when minutes times rate exceeds the
/// `Decimal` range.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::resolve_base_pay;
/// use payroll_engine::models::{EmploymentProfile, EmploymentType};
/// use rust_decimal::Decimal;
///
/// let profile = EmploymentProfile {
///     employee_id: "emp_002".to_string(),
///     name: "Sari".to_string(),
///     employment_type: EmploymentType::PartTime,
///     base_salary: None,
///     hourly_rate: Some(Decimal::new(50_000, 0)),
/// };
///
/// let result = resolve_base_pay(&profile, 540, 1).unwrap();
/// assert_eq!(result.amount, Decimal::new(450_000, 0));
/// ```
pub fn resolve_base_pay(
    profile: &EmploymentProfile,
    worked_minutes: u64,
    step_number: u32,
) -> EngineResult<BasePayResult> {
    let compensation = profile.compensation();
    let worked_hours = minutes_to_hours(worked_minutes);

    let (amount, input, reasoning) = match compensation {
        Compensation::Monthly { salary } => (
            salary,
            serde_json::json!({
                "employment_type": profile.employment_type,
                "base_salary": salary.normalize().to_string(),
                "worked_hours": worked_hours.normalize().to_string()
            }),
            format!(
                "Full-time monthly salary {} paid as-is; {} attendance hours are informational",
                salary.normalize(),
                worked_hours.normalize()
            ),
        ),
        Compensation::Hourly { rate } => {
            // Multiply before dividing so whole-minute totals stay exact.
            let amount = Decimal::from(worked_minutes)
                .checked_mul(rate)
                .ok_or_else(|| EngineError::amount_overflow(&profile.employee_id, "hourly pay"))?
                / MINUTES_PER_HOUR;
            (
                amount,
                serde_json::json!({
                    "employment_type": profile.employment_type,
                    "hourly_rate": rate.normalize().to_string(),
                    "worked_minutes": worked_minutes
                }),
                format!(
                    "{} hours x {} per hour = {}",
                    worked_hours.normalize(),
                    rate.normalize(),
                    amount.normalize()
                ),
            )
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_pay".to_string(),
        rule_name: "Base Pay Resolution".to_string(),
        employee_id: profile.employee_id.clone(),
        input,
        output: serde_json::json!({
            "amount": amount.normalize().to_string(),
            "pay_figure_missing": profile.is_missing_pay_figure()
        }),
        reasoning,
    };

    Ok(BasePayResult {
        amount,
        compensation,
        audit_step,
    })
}
