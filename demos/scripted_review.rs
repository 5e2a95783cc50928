//! Scripted Review Example
//!
//! The calling layer hands the whole batch to a Rhai script that invokes the
//! employee validator tool once per record and returns only the records that
//! need HR review, instead of every intermediate result.
//!
//! Run with: `cargo run --example scripted_review`

use employee_validator::{ExecutionLimits, FixedClock, ToolOrchestrator, sample_records};

fn main() {
    println!("=== Scripted Review Example ===\n");

    let mut orchestrator = ToolOrchestrator::new();
    orchestrator.register_employee_validator(FixedClock::placeholder());

    println!("Registered tools: {:?}\n", orchestrator.registered_tools());

    let script = r#"
        let review = [];
        let forwarded = 0;

        for record in input {
            let result = validate_employee_data(record);
            if result.Is_Valid {
                forwarded += 1;
            } else {
                review.push(#{
                    name: result.Name,
                    salary: result.Original_Salary,
                    status: result.Validation_Status
                });
            }
        }

        #{ forwarded: forwarded, needs_review: review }
    "#;

    let records = sample_records();
    // One validation per record; anything more means the script is misbehaving
    let limits = ExecutionLimits::quick().with_max_tool_calls(records.len());

    let input = match serde_json::to_value(&records) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Failed to encode sample records: {e}");
            return;
        }
    };

    match orchestrator.execute_with_input(script, input, limits) {
        Ok(result) => {
            println!("Tool calls made: {}", result.tool_calls.len());
            for call in &result.tool_calls {
                println!("  - {} ({}ms)", call.tool_name, call.duration_ms);
            }
            println!("Execution time: {}ms\n", result.execution_time_ms);

            let pretty = serde_json::to_string_pretty(&result.output)
                .unwrap_or_else(|_| result.output.to_string());
            println!("Script output:\n{pretty}");
        }
        Err(e) => eprintln!("Script failed: {e}"),
    }
}
