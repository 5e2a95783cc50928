//! Employee Validator - a reusable data validation tool and the workflow that calls it
//!
//! The validator standardizes an employee name and checks the salary against
//! a fixed minimum. The workflow runner drives it over a batch of records,
//! decides what happens to each one and narrates the run. For scripted
//! orchestration, the validator can also be registered as a tool on a
//! [`ToolOrchestrator`] and called from Rhai scripts.
//!
//! ## Example (Workflow)
//!
//! ```ignore
//! use employee_validator::{EmployeeRecord, WorkflowRunner, write_summary};
//!
//! let records = vec![
//!     EmployeeRecord::new("alice smith ", 55_000.0),
//!     EmployeeRecord::new("bob jones", 35_000.0),
//! ];
//!
//! let mut stdout = std::io::stdout();
//! let results = WorkflowRunner::new().run(&records, &mut stdout)?;
//! write_summary(&results, &mut stdout)?;
//!
//! assert_eq!(results[0].name(), "Alice Smith");
//! assert!(!results[1].is_valid());
//! ```
//!
//! ## Example (Scripted)
//!
//! ```ignore
//! use employee_validator::{ExecutionLimits, FixedClock, ToolOrchestrator};
//!
//! let mut orchestrator = ToolOrchestrator::new();
//! orchestrator.register_employee_validator(FixedClock::placeholder());
//!
//! let result = orchestrator.execute(
//!     r#"validate_employee_data(#{ name: "bob jones", salary: 35000.0 }).Is_Valid"#,
//!     ExecutionLimits::quick(),
//! )?;
//!
//! assert_eq!(result.output, serde_json::json!(false));
//! ```

pub mod clock;
pub mod engine;
pub mod sandbox;
pub mod types;
pub mod validator;
pub mod workflow;

pub use clock::{Clock, FixedClock, PLACEHOLDER_TIMESTAMP, SystemClock};
pub use engine::{ToolExecutor, ToolOrchestrator, VALIDATE_EMPLOYEE_TOOL, dynamic_to_json};
pub use sandbox::{
    ExecutionLimits,
    // Default limit constants
    DEFAULT_MAX_ARRAY_SIZE, DEFAULT_MAX_MAP_SIZE, DEFAULT_MAX_OPERATIONS, DEFAULT_MAX_STRING_SIZE,
    DEFAULT_MAX_TOOL_CALLS, DEFAULT_TIMEOUT_MS,
    // Profile constants
    EXTENDED_MAX_OPERATIONS, EXTENDED_MAX_TOOL_CALLS, EXTENDED_TIMEOUT_MS, QUICK_MAX_OPERATIONS,
    QUICK_MAX_TOOL_CALLS, QUICK_TIMEOUT_MS,
};
pub use types::{
    EmployeeRecord, OrchestratorError, OrchestratorResult, ToolCall, ValidationResult,
    ValidationStatus, WorkflowError,
};
pub use validator::{MIN_SALARY_USD, standardize_name, validate_employee_data, validate_record};
pub use workflow::{DownstreamAction, WorkflowRunner, format_usd, sample_records, write_summary};
