//! Demonstration driver: validates the sample batch and prints a summary
//!
//! Run with: cargo run --bin employee-workflow

use employee_validator::{WorkflowRunner, sample_records, write_summary};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries the workflow narration
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Employee Validator v{}", env!("CARGO_PKG_VERSION"));

    let records = sample_records();
    let mut stdout = std::io::stdout().lock();

    let results = WorkflowRunner::new().run(&records, &mut stdout)?;
    write_summary(&results, &mut stdout)?;

    Ok(())
}
