//! Attendance aggregation functionality.
//!
//! This module sums the minutes of an employee's attendance records for a
//! period and converts them to hours. Incomplete records (no check-out) are
//! counted but contribute no minutes.

use rust_decimal::Decimal;

use crate::models::{AttendanceRecord, AuditStep, PayPeriod};

/// Minutes in one hour.
pub const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// The result of aggregating attendance records.
#[derive(Debug, Clone)]
pub struct AttendanceSummary {
    /// Sum of payable minutes across all records.
    pub total_minutes: u64,
    /// `total_minutes / 60`, unrounded.
    pub total_hours: Decimal,
    /// Records with a check-out.
    pub complete_records: u32,
    /// Records without a check-out, which contributed zero minutes.
    pub open_records: u32,
    /// The audit step recording this aggregation.
    pub audit_step: AuditStep,
}

/// Converts whole minutes to hours without rounding.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::minutes_to_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(minutes_to_hours(540), Decimal::new(9, 0));
/// assert_eq!(minutes_to_hours(90), Decimal::new(15, 1));
/// ```
pub fn minutes_to_hours(minutes: u64) -> Decimal {
    Decimal::from(minutes) / MINUTES_PER_HOUR
}

/// Sums the payable minutes of the given records.
///
/// The caller supplies the records that belong to the employee and period
/// (see [`select_attendance`]); this function does not filter them.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::aggregate_attendance;
/// use payroll_engine::models::AttendanceRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
/// let records = vec![
///     AttendanceRecord {
///         employee_id: "emp_001".to_string(),
///         date: day,
///         check_in: Some(day.and_hms_opt(9, 0, 0).unwrap()),
///         check_out: Some(day.and_hms_opt(17, 0, 0).unwrap()),
///         total_minutes: 480,
///     },
/// ];
///
/// let summary = aggregate_attendance("emp_001", &records, 1);
/// assert_eq!(summary.total_minutes, 480);
/// assert_eq!(summary.total_hours, Decimal::new(8, 0));
/// ```
pub fn aggregate_attendance<'a, I>(
    employee_id: &str,
    records: I,
    step_number: u32,
) -> AttendanceSummary
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    let mut total_minutes: u64 = 0;
    let mut complete_records: u32 = 0;
    let mut open_records: u32 = 0;

    for record in records {
        if record.is_complete() {
            complete_records += 1;
        } else {
            open_records += 1;
        }
        total_minutes += u64::from(record.payable_minutes());
    }

    let total_hours = minutes_to_hours(total_minutes);

    let reasoning = if open_records > 0 {
        format!(
            "{} complete record(s) totalling {} minutes ({} hours); {} open record(s) counted as zero",
            complete_records,
            total_minutes,
            total_hours.normalize(),
            open_records
        )
    } else {
        format!(
            "{} complete record(s) totalling {} minutes ({} hours)",
            complete_records,
            total_minutes,
            total_hours.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "attendance_aggregation".to_string(),
        rule_name: "Attendance Aggregation".to_string(),
        employee_id: employee_id.to_string(),
        input: serde_json::json!({
            "records": complete_records + open_records
        }),
        output: serde_json::json!({
            "total_minutes": total_minutes,
            "total_hours": total_hours.normalize().to_string(),
            "complete_records": complete_records,
            "open_records": open_records
        }),
        reasoning,
    };

    AttendanceSummary {
        total_minutes,
        total_hours,
        complete_records,
        open_records,
        audit_step,
    }
}

/// Picks the records that belong to `employee_id` and fall within `period`.
pub fn select_attendance<'a>(
    records: &'a [AttendanceRecord],
    employee_id: &'a str,
    period: &'a PayPeriod,
) -> impl Iterator<Item = &'a AttendanceRecord> + Clone + 'a {
    records
        .iter()
        .filter(move |r| r.employee_id == employee_id && period.contains_date(r.date))
}
