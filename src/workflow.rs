//! Sequential validation workflow
//!
//! Drives the validator over a batch of records, decides the downstream
//! action for each one and narrates progress to an output sink.

use std::io::Write;
use std::sync::Arc;

use tracing::{debug, info};

use crate::clock::{Clock, FixedClock};
use crate::types::{EmployeeRecord, ValidationResult, WorkflowError};
use crate::validator::validate_record;

const SEPARATOR: &str = "--------------------------------------------------";
const MISSING: &str = "<missing>";

/// What happens to a record after validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownstreamAction {
    ForwardToOnboarding,
    /// Per-record routing only; later records are still processed
    RouteToManagerReview,
}

impl DownstreamAction {
    pub fn for_result(result: &ValidationResult) -> Self {
        if result.is_valid() {
            Self::ForwardToOnboarding
        } else {
            Self::RouteToManagerReview
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ForwardToOnboarding => "Forwarded to Onboarding System.",
            Self::RouteToManagerReview => "Routed to HR Manager Review.",
        }
    }
}

/// Runs the validator tool over a batch of employee records
#[derive(Clone)]
pub struct WorkflowRunner {
    clock: Arc<dyn Clock>,
}

impl WorkflowRunner {
    /// Runner stamping results with the placeholder timestamp
    pub fn new() -> Self {
        Self {
            clock: Arc::new(FixedClock::placeholder()),
        }
    }

    /// Builder: set the clock used for result timestamps
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Validate every record in order, writing narration to `out`.
    ///
    /// Returns one result per record, in input order.
    pub fn run<W: Write>(
        &self,
        records: &[EmployeeRecord],
        out: &mut W,
    ) -> Result<Vec<ValidationResult>, WorkflowError> {
        info!(records = records.len(), "Workflow starting");
        writeln!(out, "Workflow Starting: Running Employee Data Validator Tool...")?;
        writeln!(out, "{SEPARATOR}")?;

        let mut results = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let name = record.name.as_deref().unwrap_or(MISSING);
            let salary = record
                .salary
                .map(|s| format!("${}", format_usd(s)))
                .unwrap_or_else(|| MISSING.to_string());

            writeln!(out)?;
            writeln!(out, "Processing record for: {name} (Salary: {salary})")?;

            let result = validate_record(record, self.clock.as_ref());
            let action = DownstreamAction::for_result(&result);
            debug!(index, name = result.name(), status = %result.status(), ?action, "Record validated");

            writeln!(
                out,
                "Tool Output: Status {}. Action: {}",
                result.status(),
                action.label()
            )?;

            results.push(result);
        }

        writeln!(out, "{SEPARATOR}")?;
        writeln!(out, "Workflow Complete.")?;

        let passed = results.iter().filter(|r| r.is_valid()).count();
        info!(passed, review = results.len() - passed, "Workflow complete");

        Ok(results)
    }

    /// Like [`run`](Self::run), extracting records from loose JSON first.
    pub fn run_values<W: Write>(
        &self,
        records: &[serde_json::Value],
        out: &mut W,
    ) -> Result<Vec<ValidationResult>, WorkflowError> {
        let records: Vec<EmployeeRecord> = records.iter().map(EmployeeRecord::from_value).collect();
        self.run(&records, out)
    }
}

impl Default for WorkflowRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Write the per-result summary block.
pub fn write_summary<W: Write>(
    results: &[ValidationResult],
    out: &mut W,
) -> Result<(), WorkflowError> {
    writeln!(out)?;
    writeln!(out, "Summary of Tool Execution Results")?;
    for result in results {
        writeln!(out, "- {}: Status {}", result.name(), result.status())?;
    }
    Ok(())
}

/// Two decimals with comma thousands separators, e.g. `105,000.50`.
pub fn format_usd(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{cents}")
}

/// Three-record demonstration batch
pub fn sample_records() -> Vec<EmployeeRecord> {
    vec![
        EmployeeRecord::new("alice smith ", 55_000.00),
        EmployeeRecord::new("bob jones", 35_000.00),
        EmployeeRecord::new("CHarlie BROWN", 105_000.50),
    ]
}
