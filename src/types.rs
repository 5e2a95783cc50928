//! Core types for employee validation and tool orchestration

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Employee records
// ============================================================================

/// Raw employee record as received by the workflow
///
/// Both fields are optional: a malformed record still flows through the
/// batch instead of aborting it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Name as supplied, possibly padded and in mixed case
    #[serde(default)]
    pub name: Option<String>,
    /// Salary in USD
    #[serde(default)]
    pub salary: Option<f64>,
}

impl EmployeeRecord {
    /// Create a record with both fields present
    pub fn new(name: impl Into<String>, salary: f64) -> Self {
        Self {
            name: Some(name.into()),
            salary: Some(salary),
        }
    }

    /// Extract a record from an arbitrary JSON value.
    ///
    /// Never fails: a missing or wrongly typed field becomes `None`.
    pub fn from_value(value: &serde_json::Value) -> Self {
        Self {
            name: value
                .get("name")
                .and_then(|v| v.as_str())
                .map(str::to_owned),
            salary: value.get("salary").and_then(|v| v.as_f64()),
        }
    }
}

// ============================================================================
// Validation results
// ============================================================================

/// Outcome of the salary threshold check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationStatus {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL - BELOW THRESHOLD")]
    FailBelowThreshold,
}

impl ValidationStatus {
    pub fn from_validity(is_valid: bool) -> Self {
        if is_valid {
            Self::Pass
        } else {
            Self::FailBelowThreshold
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::FailBelowThreshold => "FAIL - BELOW THRESHOLD",
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured payload returned by the employee validator tool
///
/// Immutable once built. `Is_Valid` is always derived from
/// `Validation_Status`, so the two cannot disagree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Original_Salary")]
    original_salary: Option<f64>,
    #[serde(rename = "Validation_Status")]
    status: ValidationStatus,
    #[serde(rename = "Is_Valid")]
    is_valid: bool,
    #[serde(rename = "Timestamp")]
    timestamp: String,
}

impl ValidationResult {
    pub(crate) fn new(
        name: String,
        original_salary: Option<f64>,
        status: ValidationStatus,
        timestamp: String,
    ) -> Self {
        Self {
            name,
            original_salary,
            status,
            is_valid: status.is_pass(),
            timestamp,
        }
    }

    /// Standardized name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Salary exactly as it was supplied
    pub fn original_salary(&self) -> Option<f64> {
        self.original_salary
    }

    pub fn status(&self) -> ValidationStatus {
        self.status
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// RFC 3339 timestamp taken from the validator's clock
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Serialize into the JSON payload handed back to tool callers
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "Name": self.name,
            "Original_Salary": self.original_salary,
            "Validation_Status": self.status.as_str(),
            "Is_Valid": self.is_valid,
            "Timestamp": self.timestamp,
        })
    }
}

// ============================================================================
// Orchestration results
// ============================================================================

/// Result from executing an orchestration script
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorResult {
    /// Whether execution completed successfully
    pub success: bool,
    /// Final expression value of the script, as JSON
    pub output: serde_json::Value,
    /// All tool calls made during execution
    pub tool_calls: Vec<ToolCall>,
    /// Total execution time in milliseconds
    pub execution_time_ms: u64,
}

impl OrchestratorResult {
    pub fn success(
        output: serde_json::Value,
        tool_calls: Vec<ToolCall>,
        execution_time_ms: u64,
    ) -> Self {
        Self {
            success: true,
            output,
            tool_calls,
            execution_time_ms,
        }
    }

    /// Tool calls that returned an error
    pub fn failed_calls(&self) -> impl Iterator<Item = &ToolCall> {
        self.tool_calls.iter().filter(|c| !c.success)
    }
}

/// Record of a single tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool that was called
    pub tool_name: String,
    /// Input passed to the tool
    pub input: serde_json::Value,
    /// Output returned by the tool, or the error message on failure
    pub output: serde_json::Value,
    /// Whether the call succeeded
    pub success: bool,
    /// Execution time for this call in milliseconds
    pub duration_ms: u64,
}

// ============================================================================
// Errors
// ============================================================================

/// Errors that can occur during orchestration
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("Script compilation failed: {0}")]
    CompilationError(String),

    #[error("Script execution failed: {0}")]
    ExecutionError(String),

    #[error("Script exceeded maximum operations ({0})")]
    MaxOperationsExceeded(u64),

    #[error("Script exceeded maximum tool calls ({0})")]
    MaxToolCallsExceeded(usize),

    #[error("Script execution timed out after {0}ms")]
    Timeout(u64),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Tool execution failed: {0}")]
    ToolError(String),
}

/// Errors raised while running a validation workflow
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Failed to write workflow output: {0}")]
    Output(#[from] std::io::Error),
}
