//! Run a file of calculator requests in parallel
//!
//! Usage: run_batch <requests.json> [summary.csv]
//!
//! Writes one summary row per request, in request order.

use anyhow::{Context, Result};
use finance_calculators::runner::load_requests;
use finance_calculators::{CalculatorConfig, CalculatorRunner};
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    index: usize,
    calculator: &'a str,
    status: &'a str,
    metric: &'a str,
    value: Option<f64>,
    error: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input_path = args
        .next()
        .context("usage: run_batch <requests.json> [summary.csv]")?;
    let output_path = args.next().unwrap_or_else(|| "batch_summary.csv".to_string());

    let start = Instant::now();
    println!("Loading requests from {}...", input_path);
    let requests = load_requests(&input_path)
        .with_context(|| format!("Failed to load requests from {}", input_path))?;
    println!("Loaded {} requests in {:?}", requests.len(), start.elapsed());

    let runner = CalculatorRunner::new(CalculatorConfig::from_env());
    println!("Schedules start {}", runner.config().start_date);

    println!("Running calculations...");
    let run_start = Instant::now();
    let results = runner.run_batch(&requests);
    println!("Calculations complete in {:?}", run_start.elapsed());

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("Failed to create {}", output_path))?;
    let mut failures = 0;

    for (index, (request, result)) in requests.iter().zip(&results).enumerate() {
        let row = match result {
            Ok(response) => {
                let (metric, value) = response.headline();
                SummaryRow {
                    index,
                    calculator: request.calculator_name(),
                    status: "ok",
                    metric,
                    value: Some(value),
                    error: None,
                }
            }
            Err(e) => {
                failures += 1;
                SummaryRow {
                    index,
                    calculator: request.calculator_name(),
                    status: "error",
                    metric: "",
                    value: None,
                    error: Some(e.to_string()),
                }
            }
        };
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!(
        "Wrote {} rows to {} ({} failed)",
        results.len(),
        output_path,
        failures
    );
    println!("Total time: {:?}", start.elapsed());

    Ok(())
}
