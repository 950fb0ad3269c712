//! Employment profile and related types.
//!
//! This module defines the [`EmploymentProfile`] struct, the [`EmploymentType`]
//! enum and the [`Compensation`] sum type that the payroll calculator matches on.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents the type of employment arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    /// Full-time employment, paid a fixed monthly salary.
    FullTime,
    /// Part-time employment, paid per hour worked.
    PartTime,
}

impl EmploymentType {
    /// Returns the wire name of the employment type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "full_time",
            EmploymentType::PartTime => "part_time",
        }
    }
}

impl std::fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authoritative pay figure of an employee.
///
/// Only one of a profile's two pay fields is meaningful at a time; this type
/// carries the one that is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compensation {
    /// Fixed monthly salary.
    Monthly {
        /// The monthly amount.
        salary: Decimal,
    },
    /// Pay per hour of recorded attendance.
    Hourly {
        /// The hourly amount.
        rate: Decimal,
    },
}

/// Represents an employee's compensation profile for a payroll run.
///
/// A profile is read-only for the calculator. Pay fields that are absent
/// deserialize to `None` and are treated as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentProfile {
    /// Unique identifier for the employee.
    pub employee_id: String,
    /// The employee's display name.
    pub name: String,
    /// The type of employment arrangement.
    pub employment_type: EmploymentType,
    /// Monthly salary, meaningful only for full-time employees.
    #[serde(default)]
    pub base_salary: Option<Decimal>,
    /// Hourly rate, meaningful only for part-time employees.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
}

impl EmploymentProfile {
    /// Resolves the authoritative pay figure for this profile.
    ///
    /// The field that does not match the employment type is ignored, and a
    /// missing authoritative field resolves to zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{Compensation, EmploymentProfile, EmploymentType};
    /// use rust_decimal::Decimal;
    ///
    /// let profile = EmploymentProfile {
    ///     employee_id: "emp_002".to_string(),
    ///     name: "Sari".to_string(),
    ///     employment_type: EmploymentType::PartTime,
    ///     base_salary: Some(Decimal::new(9_000_000, 0)),
    ///     hourly_rate: Some(Decimal::new(50_000, 0)),
    /// };
    /// assert_eq!(
    ///     profile.compensation(),
    ///     Compensation::Hourly { rate: Decimal::new(50_000, 0) }
    /// );
    /// ```
    pub fn compensation(&self) -> Compensation {
        match self.employment_type {
            EmploymentType::FullTime => Compensation::Monthly {
                salary: self.base_salary.unwrap_or(Decimal::ZERO),
            },
            EmploymentType::PartTime => Compensation::Hourly {
                rate: self.hourly_rate.unwrap_or(Decimal::ZERO),
            },
        }
    }

    /// Returns true when the authoritative pay field is absent.
    pub fn is_missing_pay_figure(&self) -> bool {
        match self.employment_type {
            EmploymentType::FullTime => self.base_salary.is_none(),
            EmploymentType::PartTime => self.hourly_rate.is_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_profile(employment_type: EmploymentType) -> EmploymentProfile {
        EmploymentProfile {
            employee_id: "emp_001".to_string(),
            name: "Budi Santoso".to_string(),
            employment_type,
            base_salary: Some(Decimal::new(5_000_000, 0)),
            hourly_rate: Some(Decimal::new(50_000, 0)),
        }
    }

    #[test]
    fn test_deserialize_full_time_profile() {
        let json = r#"{
            "employee_id": "emp_001",
            "name": "Budi Santoso",
            "employment_type": "full_time",
            "base_salary": "5000000"
        }"#;

        let profile: EmploymentProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.employee_id, "emp_001");
        assert_eq!(profile.employment_type, EmploymentType::FullTime);
        assert_eq!(profile.base_salary, Some(Decimal::new(5_000_000, 0)));
        assert_eq!(profile.hourly_rate, None);
    }

    #[test]
    fn test_deserialize_part_time_profile_with_numeric_rate() {
        let json = r#"{
            "employee_id": "emp_002",
            "name": "Sari",
            "employment_type": "part_time",
            "hourly_rate": 50000
        }"#;

        let profile: EmploymentProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.employment_type, EmploymentType::PartTime);
        assert_eq!(profile.hourly_rate, Some(Decimal::new(50_000, 0)));
    }

    #[test]
    fn test_full_time_compensation_ignores_hourly_rate() {
        let profile = create_test_profile(EmploymentType::FullTime);
        assert_eq!(
            profile.compensation(),
            Compensation::Monthly {
                salary: Decimal::new(5_000_000, 0)
            }
        );
    }

    #[test]
    fn test_part_time_compensation_ignores_salary() {
        let profile = create_test_profile(EmploymentType::PartTime);
        assert_eq!(
            profile.compensation(),
            Compensation::Hourly {
                rate: Decimal::new(50_000, 0)
            }
        );
    }

    #[test]
    fn test_missing_pay_figure_resolves_to_zero() {
        let mut profile = create_test_profile(EmploymentType::FullTime);
        profile.base_salary = None;

        assert!(profile.is_missing_pay_figure());
        assert_eq!(
            profile.compensation(),
            Compensation::Monthly {
                salary: Decimal::ZERO
            }
        );
    }

    #[test]
    fn test_inactive_field_missing_is_not_reported() {
        let mut profile = create_test_profile(EmploymentType::PartTime);
        profile.base_salary = None;
        assert!(!profile.is_missing_pay_figure());
    }

    #[test]
    fn test_employment_type_serialization() {
        assert_eq!(
            serde_json::to_string(&EmploymentType::FullTime).unwrap(),
            "\"full_time\""
        );
        assert_eq!(
            serde_json::to_string(&EmploymentType::PartTime).unwrap(),
            "\"part_time\""
        );
        assert_eq!(EmploymentType::PartTime.to_string(), "part_time");
    }
}
