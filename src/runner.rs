//! Request dispatch and batch runs
//!
//! Wraps the five calculators behind one tagged request type so callers
//! (CLI, batch files, Lambda) can hand over JSON and get JSON back.
//!
//! # Example
//! ```ignore
//! let runner = CalculatorRunner::new(CalculatorConfig::default());
//! let request: CalculatorRequest = serde_json::from_str(
//!     r#"{"calculator":"biweekly_mortgage","loanAmount":300000,"interestRate":6.5,"loanTerm":30}"#,
//! )?;
//! let response = runner.run_validated(&request)?;
//! ```

use crate::config::CalculatorConfig;
use crate::debt::{
    calculate_balance_transfer, calculate_snowball, BalanceTransferInputs, BalanceTransferResult,
    SnowballInputs, SnowballResult,
};
use crate::error::Result;
use crate::mortgage::{
    calculate_biweekly_mortgage, calculate_early_payoff, BiweeklyMortgageInputs,
    BiweeklyMortgageResult, EarlyPayoffInputs, EarlyPayoffResult,
};
use crate::savings::{calculate_savings_goal, SavingsGoalInputs, SavingsGoalResult};
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A calculation request, tagged by `"calculator"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculatorRequest {
    Snowball(SnowballInputs),
    BalanceTransfer(BalanceTransferInputs),
    BiweeklyMortgage(BiweeklyMortgageInputs),
    EarlyPayoff(EarlyPayoffInputs),
    SavingsGoal(SavingsGoalInputs),
}

impl CalculatorRequest {
    pub fn calculator_name(&self) -> &'static str {
        match self {
            CalculatorRequest::Snowball(_) => "snowball",
            CalculatorRequest::BalanceTransfer(_) => "balance_transfer",
            CalculatorRequest::BiweeklyMortgage(_) => "biweekly_mortgage",
            CalculatorRequest::EarlyPayoff(_) => "early_payoff",
            CalculatorRequest::SavingsGoal(_) => "savings_goal",
        }
    }

    /// Caller-side range checks for the wrapped inputs
    pub fn validate(&self) -> Result<()> {
        match self {
            CalculatorRequest::Snowball(inputs) => inputs.validate(),
            CalculatorRequest::BalanceTransfer(inputs) => inputs.validate(),
            CalculatorRequest::BiweeklyMortgage(inputs) => inputs.validate(),
            CalculatorRequest::EarlyPayoff(inputs) => inputs.validate(),
            CalculatorRequest::SavingsGoal(inputs) => inputs.validate(),
        }
    }
}

/// A calculation result, tagged like the request that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculatorResponse {
    Snowball(SnowballResult),
    BalanceTransfer(BalanceTransferResult),
    BiweeklyMortgage(BiweeklyMortgageResult),
    EarlyPayoff(EarlyPayoffResult),
    SavingsGoal(SavingsGoalResult),
}

impl CalculatorResponse {
    /// The single figure a summary table shows for this result
    pub fn headline(&self) -> (&'static str, f64) {
        match self {
            CalculatorResponse::Snowball(r) => ("totalInterestPaid", r.total_interest_paid),
            CalculatorResponse::BalanceTransfer(r) => ("totalSavings", r.total_savings),
            CalculatorResponse::BiweeklyMortgage(r) => ("interestSaved", r.interest_saved),
            CalculatorResponse::EarlyPayoff(r) => ("interestSaved", r.interest_saved),
            CalculatorResponse::SavingsGoal(r) => ("requiredContribution", r.required_contribution),
        }
    }
}

/// Runs requests against one configuration
#[derive(Debug, Clone)]
pub struct CalculatorRunner {
    config: CalculatorConfig,
}

impl CalculatorRunner {
    pub fn new(config: CalculatorConfig) -> Self {
        Self { config }
    }

    /// Run a request without input validation
    pub fn run(&self, request: &CalculatorRequest) -> Result<CalculatorResponse> {
        let config = &self.config;
        Ok(match request {
            CalculatorRequest::Snowball(inputs) => {
                CalculatorResponse::Snowball(calculate_snowball(inputs, config)?)
            }
            CalculatorRequest::BalanceTransfer(inputs) => {
                CalculatorResponse::BalanceTransfer(calculate_balance_transfer(inputs, config)?)
            }
            CalculatorRequest::BiweeklyMortgage(inputs) => {
                CalculatorResponse::BiweeklyMortgage(calculate_biweekly_mortgage(inputs, config)?)
            }
            CalculatorRequest::EarlyPayoff(inputs) => {
                CalculatorResponse::EarlyPayoff(calculate_early_payoff(inputs, config)?)
            }
            CalculatorRequest::SavingsGoal(inputs) => {
                CalculatorResponse::SavingsGoal(calculate_savings_goal(inputs, config)?)
            }
        })
    }

    /// Validate the inputs, then run
    pub fn run_validated(&self, request: &CalculatorRequest) -> Result<CalculatorResponse> {
        request.validate()?;
        self.run(request)
    }

    /// Validate and run independent requests in parallel; results keep request order
    pub fn run_batch(&self, requests: &[CalculatorRequest]) -> Vec<Result<CalculatorResponse>> {
        info!("Running batch of {} requests", requests.len());
        requests
            .par_iter()
            .map(|request| self.run_validated(request))
            .collect()
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }
}

impl Default for CalculatorRunner {
    fn default() -> Self {
        Self::new(CalculatorConfig::default())
    }
}

/// Load a JSON array of requests
pub fn load_requests<P: AsRef<Path>>(path: P) -> Result<Vec<CalculatorRequest>> {
    let file = std::fs::File::open(path)?;
    let requests = serde_json::from_reader(std::io::BufReader::new(file))?;
    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;
    use chrono::NaiveDate;

    fn runner() -> CalculatorRunner {
        CalculatorRunner::new(CalculatorConfig::starting(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        ))
    }

    #[test]
    fn test_request_from_json() {
        let json = r#"{"calculator":"biweekly_mortgage","loanAmount":300000,"interestRate":6.5,"loanTerm":30}"#;
        let request: CalculatorRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request,
            CalculatorRequest::BiweeklyMortgage(BiweeklyMortgageInputs::default())
        );

        let response = runner().run_validated(&request).unwrap();
        match response {
            CalculatorResponse::BiweeklyMortgage(r) => assert_eq!(r.monthly_payoff_months, 360),
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_balance_transfer_json_field_names() {
        let json = r#"{
            "calculator": "balance_transfer",
            "currentBalance": 8000, "currentAPR": 22.5, "transferAPR": 0,
            "transferFee": 3, "promoLength": 18, "postPromoAPR": 19.99,
            "monthlyPayment": 300
        }"#;
        let request: CalculatorRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request,
            CalculatorRequest::BalanceTransfer(BalanceTransferInputs::default())
        );
    }

    #[test]
    fn test_response_serializes_with_tag() {
        let request = CalculatorRequest::SavingsGoal(SavingsGoalInputs::default());
        let response = runner().run(&request).unwrap();
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["calculator"], "savings_goal");
        assert!(value["requiredContribution"].as_f64().unwrap() > 0.0);
        assert_eq!(value["milestones"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_batch_keeps_order_and_isolates_failures() {
        let requests = vec![
            CalculatorRequest::Snowball(SnowballInputs::default()),
            CalculatorRequest::SavingsGoal(SavingsGoalInputs {
                current_savings: 90_000.0,
                ..Default::default()
            }),
            CalculatorRequest::EarlyPayoff(EarlyPayoffInputs::default()),
        ];
        let results = runner().run_batch(&requests);

        assert_eq!(results.len(), 3);
        assert!(matches!(results[0], Ok(CalculatorResponse::Snowball(_))));
        assert!(matches!(results[1], Err(CalcError::InvalidInput(_))));
        assert!(matches!(results[2], Ok(CalculatorResponse::EarlyPayoff(_))));
    }

    #[test]
    fn test_batch_matches_single_runs() {
        let requests = vec![
            CalculatorRequest::BalanceTransfer(BalanceTransferInputs::default()),
            CalculatorRequest::BiweeklyMortgage(BiweeklyMortgageInputs::default()),
        ];
        let runner = runner();
        let batch = runner.run_batch(&requests);
        for (request, result) in requests.iter().zip(batch) {
            assert_eq!(result.unwrap(), runner.run(request).unwrap());
        }
    }

    #[test]
    fn test_headline() {
        let response = runner()
            .run(&CalculatorRequest::BalanceTransfer(BalanceTransferInputs::default()))
            .unwrap();
        let (label, value) = response.headline();
        assert_eq!(label, "totalSavings");
        assert!(value > 0.0);
    }
}
