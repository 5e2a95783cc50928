//! Rhai engine setup and tool orchestration
//!
//! The orchestrator plays the part of the calling layer: tools are
//! registered by name, invoked directly through [`ToolOrchestrator::call_tool`]
//! or from a Rhai script where each tool is an ordinary function.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use rhai::{Dynamic, Engine, EvalAltResult, Scope};
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::sandbox::ExecutionLimits;
use crate::types::{EmployeeRecord, OrchestratorError, OrchestratorResult, ToolCall};
use crate::validator::validate_record;

/// Name under which the employee validator is registered
pub const VALIDATE_EMPLOYEE_TOOL: &str = "validate_employee_data";

pub type ToolExecutor =
    Arc<dyn Fn(serde_json::Value) -> Result<serde_json::Value, String> + Send + Sync>;

type SharedVec<T> = Arc<Mutex<Vec<T>>>;
type AbortSlot = Arc<Mutex<Option<ToolAbort>>>;

/// Error raised into the script by a tool, with the message it was raised as
struct ToolAbort {
    message: String,
    error: OrchestratorError,
}

impl ToolAbort {
    fn raise(slot: &AbortSlot, message: String, error: OrchestratorError) -> Box<EvalAltResult> {
        let raised: Box<EvalAltResult> = message.clone().into();
        *lock(slot) = Some(Self { message, error });
        raised
    }
}

fn lock<T>(shared: &Mutex<T>) -> MutexGuard<'_, T> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// ToolOrchestrator
// ============================================================================

/// Registry of named tools plus a sandboxed Rhai runtime to script them
#[derive(Clone, Default)]
pub struct ToolOrchestrator {
    executors: HashMap<String, ToolExecutor>,
}

impl ToolOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool executor function
    pub fn register_executor<F>(&mut self, name: impl Into<String>, executor: F)
    where
        F: Fn(serde_json::Value) -> Result<serde_json::Value, String> + Send + Sync + 'static,
    {
        self.executors.insert(name.into(), Arc::new(executor));
    }

    /// Register the employee validator as [`VALIDATE_EMPLOYEE_TOOL`].
    ///
    /// The tool takes `{"name": ..., "salary": ...}` and returns the
    /// serialized validation result. It never fails.
    pub fn register_employee_validator(&mut self, clock: impl Clock + 'static) {
        self.register_executor(VALIDATE_EMPLOYEE_TOOL, move |input| {
            let record = EmployeeRecord::from_value(&input);
            Ok(validate_record(&record, &clock).to_json())
        });
    }

    /// Names of all registered tools, sorted
    pub fn registered_tools(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.executors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Invoke a single tool outside of any script
    pub fn call_tool(
        &self,
        name: &str,
        input: serde_json::Value,
    ) -> Result<ToolCall, OrchestratorError> {
        let executor = self
            .executors
            .get(name)
            .ok_or_else(|| OrchestratorError::ToolNotFound(name.to_string()))?;

        let call = run_tool(name, executor, input);
        if call.success {
            Ok(call)
        } else {
            Err(OrchestratorError::ToolError(tool_error_message(&call)))
        }
    }

    /// Execute a Rhai script with the registered tools
    pub fn execute(
        &self,
        script: &str,
        limits: ExecutionLimits,
    ) -> Result<OrchestratorResult, OrchestratorError> {
        self.run_script(script, None, limits)
    }

    /// Execute a Rhai script with `input` bound to the script variable `input`
    pub fn execute_with_input(
        &self,
        script: &str,
        input: serde_json::Value,
        limits: ExecutionLimits,
    ) -> Result<OrchestratorResult, OrchestratorError> {
        self.run_script(script, Some(input), limits)
    }

    fn run_script(
        &self,
        script: &str,
        input: Option<serde_json::Value>,
        limits: ExecutionLimits,
    ) -> Result<OrchestratorResult, OrchestratorError> {
        let start_time = Instant::now();
        let tool_calls: SharedVec<ToolCall> = Arc::new(Mutex::new(Vec::new()));
        let abort: AbortSlot = Arc::new(Mutex::new(None));

        let mut engine = Engine::new();
        engine.set_max_operations(limits.max_operations);
        engine.set_max_string_size(limits.max_string_size);
        engine.set_max_array_size(limits.max_array_size);
        engine.set_max_map_size(limits.max_map_size);
        engine.set_max_expr_depths(64, 64);

        let timeout = limits.timeout();
        engine.on_progress(move |_| {
            if start_time.elapsed() > timeout {
                Some(Dynamic::UNIT)
            } else {
                None
            }
        });

        for (name, executor) in &self.executors {
            let exec = Arc::clone(executor);
            let calls = Arc::clone(&tool_calls);
            let abort = Arc::clone(&abort);
            let max_calls = limits.max_tool_calls;
            let tool_name = name.clone();

            engine.register_fn(
                name.as_str(),
                move |input: Dynamic| -> Result<Dynamic, Box<EvalAltResult>> {
                    if lock(&calls).len() >= max_calls {
                        warn!(tool = %tool_name, max_calls, "Tool call limit reached");
                        return Err(ToolAbort::raise(
                            &abort,
                            format!("Maximum tool calls ({max_calls}) exceeded"),
                            OrchestratorError::MaxToolCallsExceeded(max_calls),
                        ));
                    }

                    let call = run_tool(&tool_name, &exec, dynamic_to_json(&input));
                    let outcome = if call.success {
                        rhai::serde::to_dynamic(&call.output)
                    } else {
                        let message = tool_error_message(&call);
                        let error = OrchestratorError::ToolError(message.clone());
                        Err(ToolAbort::raise(&abort, message, error))
                    };
                    lock(&calls).push(call);
                    outcome
                },
            );
        }

        let ast = engine
            .compile(script)
            .map_err(|e| OrchestratorError::CompilationError(e.to_string()))?;

        let mut scope = Scope::new();
        if let Some(input) = input {
            let value = rhai::serde::to_dynamic(&input)
                .map_err(|e| OrchestratorError::ExecutionError(e.to_string()))?;
            scope.push("input", value);
        }

        info!(tools = self.executors.len(), "Executing orchestration script");
        let result = engine
            .eval_ast_with_scope::<Dynamic>(&mut scope, &ast)
            .map_err(|e| {
                // The recorded tool error only applies if it is what ended the script
                let pending = lock(&abort).take();
                if let Some(abort) = pending {
                    if runtime_message(&e).as_deref() == Some(abort.message.as_str()) {
                        return abort.error;
                    }
                }
                match *e {
                    EvalAltResult::ErrorTooManyOperations(_) => {
                        OrchestratorError::MaxOperationsExceeded(limits.max_operations)
                    }
                    EvalAltResult::ErrorTerminated(..) => {
                        OrchestratorError::Timeout(limits.timeout_ms)
                    }
                    other => OrchestratorError::ExecutionError(other.to_string()),
                }
            })?;

        let execution_time_ms = start_time.elapsed().as_millis() as u64;
        let calls = std::mem::take(&mut *lock(&tool_calls));
        debug!(calls = calls.len(), execution_time_ms, "Script finished");

        Ok(OrchestratorResult::success(
            dynamic_to_json(&result),
            calls,
            execution_time_ms,
        ))
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn run_tool(name: &str, executor: &ToolExecutor, input: serde_json::Value) -> ToolCall {
    let call_start = Instant::now();
    let (output, success) = match executor(input.clone()) {
        Ok(output) => (output, true),
        Err(e) => (serde_json::Value::String(e), false),
    };
    let duration_ms = call_start.elapsed().as_millis() as u64;
    debug!(tool = name, success, duration_ms, "Tool call");

    ToolCall {
        tool_name: name.to_string(),
        input,
        output,
        success,
        duration_ms,
    }
}

/// Message of the runtime error at the root of `err`, if it is one
fn runtime_message(err: &EvalAltResult) -> Option<String> {
    match err {
        EvalAltResult::ErrorRuntime(value, _) => value.clone().into_string().ok(),
        EvalAltResult::ErrorInFunctionCall(_, _, inner, _) => runtime_message(inner),
        _ => None,
    }
}

fn tool_error_message(call: &ToolCall) -> String {
    match &call.output {
        serde_json::Value::String(s) => format!("{}: {}", call.tool_name, s),
        other => format!("{}: {}", call.tool_name, other),
    }
}

/// Convert a Rhai value to JSON. Values with no JSON form become their debug string.
pub fn dynamic_to_json(value: &Dynamic) -> serde_json::Value {
    rhai::serde::from_dynamic::<serde_json::Value>(value)
        .unwrap_or_else(|_| serde_json::Value::String(format!("{value:?}")))
}

// ============================================================================
// Tests
// ============================================================================
