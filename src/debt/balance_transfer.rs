//! Balance transfer comparison
//!
//! Compares keeping a balance on the current card against moving it to a card
//! with a promotional rate. The transfer fee is added to the transferred
//! balance. A third, promo-only projection reports what would be left when the
//! promotional window closes, independent of how long the full transfer
//! scenario takes.

use crate::amortization::{monthly_rate, settle, PayoffLoop, PayoffRun};
use crate::config::CalculatorConfig;
use crate::error::Result;
use crate::validation;
use log::debug;
use serde::{Deserialize, Serialize};

/// Inputs to the balance transfer calculator (rates and fee in percent)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceTransferInputs {
    pub current_balance: f64,
    #[serde(rename = "currentAPR")]
    pub current_apr: f64,
    #[serde(rename = "transferAPR")]
    pub transfer_apr: f64,
    /// Fee as a percentage of the transferred balance
    pub transfer_fee: f64,
    /// Promotional period in months
    pub promo_length: u32,
    #[serde(rename = "postPromoAPR")]
    pub post_promo_apr: f64,
    pub monthly_payment: f64,
}

impl Default for BalanceTransferInputs {
    fn default() -> Self {
        Self {
            current_balance: 8_000.0,
            current_apr: 22.5,
            transfer_apr: 0.0,
            transfer_fee: 3.0,
            promo_length: 18,
            post_promo_apr: 19.99,
            monthly_payment: 300.0,
        }
    }
}

impl BalanceTransferInputs {
    pub fn validate(&self) -> Result<()> {
        validation::positive("Current balance", self.current_balance)?;
        validation::percentage("Current APR", self.current_apr)?;
        validation::percentage("Transfer APR", self.transfer_apr)?;
        validation::percentage("Transfer fee", self.transfer_fee)?;
        validation::positive_count("Promotional period", self.promo_length, "months")?;
        validation::percentage("Post-promo APR", self.post_promo_apr)?;
        validation::positive("Monthly payment", self.monthly_payment)
    }

    pub fn transfer_fee_amount(&self) -> f64 {
        self.current_balance * (self.transfer_fee / 100.0)
    }

    /// Balance on the new card: transferred balance plus capitalized fee
    pub fn transfer_start_balance(&self) -> f64 {
        self.current_balance + self.transfer_fee_amount()
    }
}

/// Balance transfer calculator result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceTransferResult {
    pub transfer_fee_amount: f64,
    /// Interest paid staying on the current card
    pub current_interest: f64,
    /// Interest paid on the transfer card (promo and post-promo)
    pub transfer_interest: f64,
    /// `current_interest - (transfer_interest + transfer_fee_amount)`
    pub total_savings: f64,
    /// Months to pay off the transfer card
    pub payoff_months: u32,
    pub will_payoff_during_promo: bool,
    /// Balance left when the promo ends, from the promo-only projection
    pub post_promo_balance: f64,
    pub is_worth_it: bool,
}

/// Keep paying the current card at its flat APR
fn current_card_scenario(inputs: &BalanceTransferInputs, config: &CalculatorConfig) -> Result<PayoffRun> {
    let rate = monthly_rate(inputs.current_apr);
    PayoffLoop::new("current card", inputs.current_balance, config.transfer_max_months)
        .stop_on_stall()
        .simulate(|_| rate, |_| inputs.monthly_payment)
        .into_paid_off()
}

/// Pay the transfer card: promo APR for the first `promo_length` months, post-promo APR after
fn transfer_card_scenario(inputs: &BalanceTransferInputs, config: &CalculatorConfig) -> Result<PayoffRun> {
    let promo_rate = monthly_rate(inputs.transfer_apr);
    let post_promo_rate = monthly_rate(inputs.post_promo_apr);
    PayoffLoop::new("transfer card", inputs.transfer_start_balance(), config.transfer_max_months)
        .stop_on_stall()
        .simulate(
            |month| {
                if month <= inputs.promo_length {
                    promo_rate
                } else {
                    post_promo_rate
                }
            },
            |_| inputs.monthly_payment,
        )
        .into_paid_off()
}

/// Balance remaining after exactly `promo_length` months at the promo APR.
///
/// Deliberately separate from the transfer scenario: it answers "what is left
/// if only the promotional period were available".
fn promo_only_balance(inputs: &BalanceTransferInputs) -> f64 {
    let rate = monthly_rate(inputs.transfer_apr);
    let mut balance = inputs.transfer_start_balance();

    for _ in 0..inputs.promo_length {
        if balance <= 0.0 {
            break;
        }
        let interest = balance * rate;
        let principal = (inputs.monthly_payment - interest).min(balance);
        balance = settle(balance - principal);
    }

    balance
}

/// Compare the current card against the balance transfer offer
pub fn calculate_balance_transfer(
    inputs: &BalanceTransferInputs,
    config: &CalculatorConfig,
) -> Result<BalanceTransferResult> {
    let transfer_fee_amount = inputs.transfer_fee_amount();

    let current = current_card_scenario(inputs, config)?;
    let transfer = transfer_card_scenario(inputs, config)?;
    let post_promo_balance = promo_only_balance(inputs);

    let total_savings = current.total_interest - (transfer.total_interest + transfer_fee_amount);

    debug!(
        "Balance transfer: current {} months, transfer {} months, savings {:.2}",
        current.periods, transfer.periods, total_savings
    );

    Ok(BalanceTransferResult {
        transfer_fee_amount,
        current_interest: current.total_interest,
        transfer_interest: transfer.total_interest,
        total_savings,
        payoff_months: transfer.periods,
        will_payoff_during_promo: transfer.periods <= inputs.promo_length,
        post_promo_balance,
        is_worth_it: total_savings > 0.0,
    })
}
