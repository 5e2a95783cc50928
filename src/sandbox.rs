//! Execution limits for orchestration scripts

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_OPERATIONS: u64 = 100_000;
pub const DEFAULT_MAX_TOOL_CALLS: usize = 50;
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_MAX_STRING_SIZE: usize = 1_000_000;
pub const DEFAULT_MAX_ARRAY_SIZE: usize = 10_000;
pub const DEFAULT_MAX_MAP_SIZE: usize = 1_000;

/// Small batches: a handful of records per script
pub const QUICK_MAX_OPERATIONS: u64 = 10_000;
pub const QUICK_MAX_TOOL_CALLS: usize = 10;
pub const QUICK_TIMEOUT_MS: u64 = 5_000;

/// Large batches: one tool call per record
pub const EXTENDED_MAX_OPERATIONS: u64 = 1_000_000;
pub const EXTENDED_MAX_TOOL_CALLS: usize = 5_000;
pub const EXTENDED_TIMEOUT_MS: u64 = 120_000;

/// Bounds applied to a single script execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionLimits {
    /// Maximum number of operations (prevents infinite loops)
    pub max_operations: u64,
    /// Maximum number of tool calls, i.e. records validated per script
    pub max_tool_calls: usize,
    /// Wall-clock budget in milliseconds
    pub timeout_ms: u64,
    /// Maximum string size in bytes
    pub max_string_size: usize,
    /// Maximum array length, including the `input` batch
    pub max_array_size: usize,
    /// Maximum number of keys in an object map
    pub max_map_size: usize,
}

impl Default for ExecutionLimits {
    fn default() -> Self {
        Self {
            max_operations: DEFAULT_MAX_OPERATIONS,
            max_tool_calls: DEFAULT_MAX_TOOL_CALLS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_string_size: DEFAULT_MAX_STRING_SIZE,
            max_array_size: DEFAULT_MAX_ARRAY_SIZE,
            max_map_size: DEFAULT_MAX_MAP_SIZE,
        }
    }
}

impl ExecutionLimits {
    /// Limits for validating a few records
    pub fn quick() -> Self {
        Self {
            max_operations: QUICK_MAX_OPERATIONS,
            max_tool_calls: QUICK_MAX_TOOL_CALLS,
            timeout_ms: QUICK_TIMEOUT_MS,
            ..Default::default()
        }
    }

    /// Limits for validating a large batch in one script
    pub fn extended() -> Self {
        Self {
            max_operations: EXTENDED_MAX_OPERATIONS,
            max_tool_calls: EXTENDED_MAX_TOOL_CALLS,
            timeout_ms: EXTENDED_TIMEOUT_MS,
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Builder: cap script operations
    pub fn with_max_operations(mut self, max: u64) -> Self {
        self.max_operations = max;
        self
    }

    /// Builder: cap tool calls, typically at the batch size
    pub fn with_max_tool_calls(mut self, max: usize) -> Self {
        self.max_tool_calls = max;
        self
    }

    /// Builder: set the wall-clock budget
    pub fn with_timeout_ms(mut self, timeout: u64) -> Self {
        self.timeout_ms = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = ExecutionLimits::default();
        assert_eq!(limits.max_operations, DEFAULT_MAX_OPERATIONS);
        assert_eq!(limits.max_tool_calls, DEFAULT_MAX_TOOL_CALLS);
        assert_eq!(limits.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_profiles_keep_container_sizes() {
        let quick = ExecutionLimits::quick();
        let extended = ExecutionLimits::extended();
        assert_eq!(quick.max_tool_calls, 10);
        assert_eq!(extended.max_tool_calls, 5_000);
        assert_eq!(quick.max_array_size, DEFAULT_MAX_ARRAY_SIZE);
        assert_eq!(extended.max_map_size, DEFAULT_MAX_MAP_SIZE);
    }

    #[test]
    fn test_builder_pattern() {
        let limits = ExecutionLimits::quick()
            .with_max_tool_calls(3)
            .with_timeout_ms(250);

        assert_eq!(limits.max_tool_calls, 3);
        assert_eq!(limits.timeout_ms, 250);
        assert_eq!(limits.max_operations, QUICK_MAX_OPERATIONS);
    }

    #[test]
    fn test_limits_deserialize() {
        let limits: ExecutionLimits = serde_json::from_value(serde_json::json!({
            "max_operations": 5,
            "max_tool_calls": 1,
            "timeout_ms": 10,
            "max_string_size": 64,
            "max_array_size": 4,
            "max_map_size": 4
        }))
        .unwrap();
        assert_eq!(limits.max_operations, 5);
        assert_eq!(limits.timeout(), Duration::from_millis(10));
        assert_eq!(limits.max_string_size, 64);
        assert_eq!(limits.max_map_size, 4);
    }
}
