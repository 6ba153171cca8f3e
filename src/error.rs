//! Error types for the calculation engine
//!
//! Engine failures are limited to non-convergence (a payment that can never
//! retire the balance inside the iteration cap). Input range problems are
//! reported through `InvalidInput` by the validation layer before the engine
//! runs.

use thiserror::Error;

/// Errors returned by calculators, loaders and the request runner
#[derive(Error, Debug)]
pub enum CalcError {
    /// Iteration cap reached with a balance still outstanding
    #[error("Monthly payment is too low to pay off the balance ({scenario}): payment plan exceeds {max_periods} periods. Please increase your payment amount.")]
    PaymentInsufficient {
        scenario: String,
        max_periods: u32,
    },

    /// Caller input outside the accepted range
    #[error("{0}")]
    InvalidInput(String),

    /// CSV read/write errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CalcError {
    pub fn payment_insufficient(scenario: impl Into<String>, max_periods: u32) -> Self {
        CalcError::PaymentInsufficient {
            scenario: scenario.into(),
            max_periods,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        CalcError::InvalidInput(message.into())
    }

    /// True for the engine's non-convergence failure
    pub fn is_non_convergent(&self) -> bool {
        matches!(self, CalcError::PaymentInsufficient { .. })
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
