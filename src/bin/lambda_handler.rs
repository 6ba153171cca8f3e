//! AWS Lambda handler for calculator requests
//!
//! Accepts a tagged calculator request, either as the event itself or as a
//! JSON string under `body` (Function URL / API Gateway proxy), and returns the
//! tagged result or `{"error": "..."}`.

use finance_calculators::{CalculatorConfig, CalculatorRequest, CalculatorRunner};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use serde_json::{json, Value};

/// Unwrap a proxy-style `{"body": "<json>"}` event into the request payload
fn extract_payload(event: Value) -> Result<Value, String> {
    match event.get("body") {
        Some(Value::String(body)) => {
            serde_json::from_str(body).map_err(|e| format!("Invalid request body: {}", e))
        }
        Some(body) if body.is_object() => Ok(body.clone()),
        _ => Ok(event),
    }
}

fn respond(runner: &CalculatorRunner, event: Value) -> Value {
    let request: CalculatorRequest = match extract_payload(event)
        .and_then(|payload| serde_json::from_value(payload).map_err(|e| format!("Invalid request: {}", e)))
    {
        Ok(request) => request,
        Err(message) => {
            warn!("{}", message);
            return json!({ "error": message });
        }
    };

    let start = std::time::Instant::now();
    match runner.run_validated(&request) {
        Ok(response) => {
            info!(
                "{} calculation complete in {:?}",
                request.calculator_name(),
                start.elapsed()
            );
            serde_json::to_value(&response).unwrap_or_else(|e| json!({ "error": e.to_string() }))
        }
        Err(e) => {
            warn!("{} calculation failed: {}", request.calculator_name(), e);
            json!({ "error": e.to_string() })
        }
    }
}

async fn handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let runner = CalculatorRunner::new(CalculatorConfig::from_env());
    Ok(respond(&runner, event.payload))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
