//! Employee data validator tool
//!
//! Standardizes the employee name and checks the salary against a fixed
//! minimum. Total over its inputs: a low, zero, negative or missing salary
//! is reported as a failing result, never as an error.

use tracing::warn;

use crate::clock::{Clock, format_timestamp};
use crate::types::{EmployeeRecord, ValidationResult, ValidationStatus};

/// Minimum acceptable salary in USD (inclusive)
pub const MIN_SALARY_USD: f64 = 40_000.0;

/// Trim surrounding whitespace and title-case each whitespace-separated word.
///
/// Interior whitespace is kept as-is.
pub fn standardize_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut word_start = true;

    for ch in raw.trim().chars() {
        if ch.is_whitespace() {
            out.push(ch);
            word_start = true;
        } else if word_start {
            // Multi-char expansions (`ß` -> `SS`) keep only the first char capitalized
            let mut upper = ch.to_uppercase();
            out.extend(upper.next());
            out.extend(upper.flat_map(char::to_lowercase));
            word_start = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }

    out
}

/// Whether a salary clears [`MIN_SALARY_USD`]. NaN never does.
pub fn meets_threshold(salary: f64) -> bool {
    salary >= MIN_SALARY_USD
}

/// Validate a single name/salary pair.
pub fn validate_employee_data(
    raw_name: &str,
    raw_salary: f64,
    clock: &dyn Clock,
) -> ValidationResult {
    build_result(raw_name, Some(raw_salary), clock)
}

/// Validate a record whose fields may be missing.
///
/// A missing name standardizes to the empty string. A missing salary fails
/// validation and is reported as `null`.
pub fn validate_record(record: &EmployeeRecord, clock: &dyn Clock) -> ValidationResult {
    if record.name.is_none() {
        warn!("Employee record has no name");
    }
    if record.salary.is_none() {
        warn!(name = ?record.name, "Employee record has no salary; failing validation");
    }

    build_result(record.name.as_deref().unwrap_or_default(), record.salary, clock)
}

fn build_result(raw_name: &str, salary: Option<f64>, clock: &dyn Clock) -> ValidationResult {
    let is_valid = salary.is_some_and(meets_threshold);

    ValidationResult::new(
        standardize_name(raw_name),
        salary,
        ValidationStatus::from_validity(is_valid),
        format_timestamp(clock.now()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedClock, PLACEHOLDER_TIMESTAMP};

    #[test]
    fn test_standardize_trims_and_title_cases() {
        assert_eq!(standardize_name("alice smith "), "Alice Smith");
        assert_eq!(standardize_name("CHarlie BROWN"), "Charlie Brown");
        assert_eq!(standardize_name("  \tbob\n"), "Bob");
    }

    #[test]
    fn test_standardize_keeps_interior_whitespace() {
        assert_eq!(standardize_name("mary  ann"), "Mary  Ann");
    }

    #[test]
    fn test_standardize_edge_inputs() {
        assert_eq!(standardize_name(""), "");
        assert_eq!(standardize_name("   "), "");
        assert_eq!(standardize_name("o'NEIL"), "O'neil");
        assert_eq!(standardize_name("élodie durand"), "Élodie Durand");
    }

    #[test]
    fn test_standardize_multi_char_uppercase() {
        assert_eq!(standardize_name("ßtefan"), "Sstefan");
        assert_eq!(standardize_name("ﬁona"), "Fiona");
    }

    #[test]
    fn test_standardize_is_idempotent() {
        for raw in ["alice smith ", "CHarlie BROWN", "x", "  jean-luc  PICARD ", "ßtefan", "ﬁona ßauer"] {
            let once = standardize_name(raw);
            assert_eq!(standardize_name(&once), once);
        }
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(meets_threshold(40_000.0));
        assert!(!meets_threshold(39_999.99));
        assert!(!meets_threshold(0.0));
        assert!(!meets_threshold(-1.0));
        assert!(!meets_threshold(f64::NAN));
    }

    #[test]
    fn test_validate_passing_record() {
        let result = validate_employee_data("alice smith ", 55_000.0, &FixedClock::placeholder());
        assert_eq!(result.name(), "Alice Smith");
        assert!(result.is_valid());
        assert_eq!(result.status(), ValidationStatus::Pass);
        assert_eq!(result.original_salary(), Some(55_000.0));
        assert_eq!(result.timestamp(), PLACEHOLDER_TIMESTAMP);
    }

    #[test]
    fn test_validate_failing_record() {
        let result = validate_employee_data("bob jones", 35_000.0, &FixedClock::placeholder());
        assert_eq!(result.name(), "Bob Jones");
        assert!(!result.is_valid());
        assert_eq!(result.status(), ValidationStatus::FailBelowThreshold);
    }

    #[test]
    fn test_salary_is_not_rounded() {
        let result = validate_employee_data("CHarlie BROWN", 105_000.50, &FixedClock::placeholder());
        assert_eq!(result.original_salary(), Some(105_000.50));
        assert!(result.is_valid());
    }

    #[test]
    fn test_missing_salary_fails() {
        let record = EmployeeRecord {
            name: Some("dana".to_string()),
            salary: None,
        };
        let result = validate_record(&record, &FixedClock::placeholder());
        assert_eq!(result.name(), "Dana");
        assert!(!result.is_valid());
        assert_eq!(result.original_salary(), None);
    }

    #[test]
    fn test_missing_name_becomes_empty() {
        let record = EmployeeRecord {
            name: None,
            salary: Some(60_000.0),
        };
        let result = validate_record(&record, &FixedClock::placeholder());
        assert_eq!(result.name(), "");
        assert!(result.is_valid());
    }
}
