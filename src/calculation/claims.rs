//! Approved expense-claim summation.
//!
//! Claim amounts are added verbatim. No currency conversion or rounding is
//! applied beyond the precision of the inputs.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, LeaveRequest, PayPeriod};

/// The result of summing approved claims.
#[derive(Debug, Clone)]
pub struct ClaimsSummary {
    /// Sum of claim amounts.
    pub total: Decimal,
    /// Number of claims summed.
    pub claim_count: u32,
    /// Claims that carried no amount and were counted as zero.
    pub missing_amounts: u32,
    /// The audit step recording this summation.
    pub audit_step: AuditStep,
}

/// Sums the amounts of the given approved claims.
///
/// The caller supplies claims already filtered to approved claims for the
/// employee and period (see [`select_approved_claims`]). A claim without an
/// amount adds zero.
///
/// # Errors
///
/// Returns [`EngineError::AmountOverflow`] if the total does not fit in a
/// `Decimal`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::sum_approved_claims;
/// use payroll_engine::models::LeaveRequest;
///
/// let claims: Vec<LeaveRequest> = vec![];
/// let summary = sum_approved_claims("emp_001", &claims, 1).unwrap();
/// assert!(summary.total.is_zero());
/// ```
pub fn sum_approved_claims<'a, I>(
    employee_id: &str,
    claims: I,
    step_number: u32,
) -> EngineResult<ClaimsSummary>
where
    I: IntoIterator<Item = &'a LeaveRequest>,
{
    let mut total = Decimal::ZERO;
    let mut claim_count: u32 = 0;
    let mut missing_amounts: u32 = 0;
    let mut claim_ids: Vec<String> = Vec::new();

    for claim in claims {
        claim_count += 1;
        claim_ids.push(claim.id.clone());
        match claim.amount {
            Some(amount) => {
                total = total
                    .checked_add(amount)
                    .ok_or_else(|| EngineError::amount_overflow(employee_id, "approved claims"))?;
            }
            None => missing_amounts += 1,
        }
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "approved_claims".to_string(),
        rule_name: "Approved Claims".to_string(),
        employee_id: employee_id.to_string(),
        input: serde_json::json!({
            "claim_ids": claim_ids
        }),
        output: serde_json::json!({
            "total": total.normalize().to_string(),
            "claim_count": claim_count,
            "missing_amounts": missing_amounts
        }),
        reasoning: format!(
            "{} approved claim(s) totalling {}",
            claim_count,
            total.normalize()
        ),
    };

    Ok(ClaimsSummary {
        total,
        claim_count,
        missing_amounts,
        audit_step,
    })
}

/// Picks the approved claims of `employee_id` dated within `period`.
///
/// A claim is dated by its start date.
pub fn select_approved_claims<'a>(
    requests: &'a [LeaveRequest],
    employee_id: &'a str,
    period: &'a PayPeriod,
) -> impl Iterator<Item = &'a LeaveRequest> + Clone + 'a {
    requests.iter().filter(move |r| {
        r.employee_id == employee_id && r.is_approved_claim() && period.contains_date(r.start_date)
    })
}
