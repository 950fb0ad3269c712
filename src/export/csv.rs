//! CSV export of payroll line items.
//!
//! Text fields are quoted when they contain a separator, quote or line break,
//! and fields that a spreadsheet would evaluate as a formula are prefixed
//! with `'`. Amounts are written unquoted in plain decimal notation.

use rust_decimal::Decimal;

use crate::models::PayrollLineItem;

/// The header row of the payroll export.
pub const CSV_HEADER: &str = "Employee ID,Name,Type,Base Salary,Work Hours,Claims,Net Pay";

/// Renders line items as CSV, one row per item after the header.
///
/// Rows are separated by `\n` and the output has no trailing newline.
///
/// # Examples
///
/// ```
/// use payroll_engine::export::payroll_to_csv;
/// use payroll_engine::models::{EmploymentType, PayrollLineItem};
/// use rust_decimal::Decimal;
///
/// let item = PayrollLineItem {
///     employee_id: "emp_002".to_string(),
///     name: "Sari Wulandari".to_string(),
///     employment_type: EmploymentType::PartTime,
///     base_salary: Decimal::new(450_000, 0),
///     total_attendance_hours: Decimal::new(9, 0),
///     approved_claims: Decimal::ZERO,
///     net_pay: Decimal::new(450_000, 0),
/// };
///
/// let csv = payroll_to_csv(&[item]);
/// assert_eq!(
///     csv,
///     "Employee ID,Name,Type,Base Salary,Work Hours,Claims,Net Pay\n\
///      emp_002,Sari Wulandari,part_time,450000,9,0,450000"
/// );
/// ```
pub fn payroll_to_csv(items: &[PayrollLineItem]) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(items.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for item in items {
        let fields = [
            escape_text(&item.employee_id),
            escape_text(&item.name),
            escape_text(item.employment_type.as_str()),
            format_amount(item.base_salary),
            format_amount(item.total_attendance_hours),
            format_amount(item.approved_claims),
            format_amount(item.net_pay),
        ];
        lines.push(fields.join(","));
    }

    lines.join("\n")
}

fn format_amount(value: Decimal) -> String {
    value.normalize().to_string()
}

fn is_formula(value: &str) -> bool {
    matches!(
        value.trim_start().chars().next(),
        Some('=') | Some('+') | Some('-') | Some('@')
    )
}

fn escape_text(value: &str) -> String {
    let safe = if is_formula(value) {
        format!("'{}", value)
    } else {
        value.to_string()
    };

    if safe.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", safe.replace('"', "\"\""))
    } else {
        safe
    }
}
