//! Finance Calculators - Deterministic personal-finance projection engine
//!
//! This library provides:
//! - Debt snowball payoff simulation across multiple debts
//! - Balance transfer offer comparison with promotional rates
//! - Biweekly vs monthly mortgage comparison
//! - Early mortgage payoff with monthly, yearly or one-time extras
//! - Savings goal contribution solving with milestone tracking
//! - Batch and Lambda execution of tagged JSON requests

pub mod amortization;
pub mod config;
pub mod debt;
pub mod error;
pub mod format;
pub mod mortgage;
pub mod runner;
pub mod savings;
pub mod validation;

// Re-export commonly used types
pub use config::CalculatorConfig;
pub use error::{CalcError, Result};
pub use debt::{calculate_balance_transfer, calculate_snowball, DebtItem};
pub use mortgage::{calculate_biweekly_mortgage, calculate_early_payoff, ExtraPaymentType};
pub use runner::{CalculatorRequest, CalculatorResponse, CalculatorRunner};
pub use savings::{calculate_savings_goal, ContributionFrequency};
