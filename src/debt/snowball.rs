//! Debt snowball payoff simulation
//!
//! Debts are ranked once, smallest original balance first. Each month every
//! unpaid debt accrues interest and receives its minimum payment; the
//! highest-ranked unpaid debt (the target) also receives the extra payment.
//! The ranking never changes mid-simulation.

use crate::amortization::{add_months, monthly_rate, settle};
use crate::config::CalculatorConfig;
use crate::error::{CalcError, Result};
use crate::validation;
use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// A single debt as entered by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtItem {
    pub name: String,
    pub balance: f64,
    /// APR in percent
    pub interest_rate: f64,
    pub minimum_payment: f64,
}

impl DebtItem {
    pub fn new(name: impl Into<String>, balance: f64, interest_rate: f64, minimum_payment: f64) -> Self {
        Self {
            name: name.into(),
            balance,
            interest_rate,
            minimum_payment,
        }
    }
}

/// Inputs to the snowball calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnowballInputs {
    pub debts: Vec<DebtItem>,
    /// Fixed monthly amount added to the target debt's minimum
    #[serde(default)]
    pub extra_payment: f64,
}

impl Default for SnowballInputs {
    fn default() -> Self {
        Self {
            debts: vec![
                DebtItem::new("Credit Card 1", 3_000.0, 18.5, 75.0),
                DebtItem::new("Credit Card 2", 5_000.0, 22.0, 125.0),
            ],
            extra_payment: 200.0,
        }
    }
}

impl SnowballInputs {
    pub fn validate(&self) -> Result<()> {
        if self.debts.is_empty() {
            return Err(CalcError::invalid("Please add at least one debt"));
        }

        for debt in &self.debts {
            validation::positive(&format!("{}: Balance", debt.name), debt.balance)?;
            validation::percentage(&format!("{}: Interest rate", debt.name), debt.interest_rate)?;
            validation::positive(&format!("{}: Minimum payment", debt.name), debt.minimum_payment)?;
            validation::minimum_payment_covers_interest(
                &debt.name,
                debt.balance,
                debt.interest_rate,
                debt.minimum_payment,
            )?;
        }

        validation::non_negative("Extra payment", self.extra_payment)
    }
}

/// One debt's activity in one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffScheduleItem {
    pub month: u32,
    pub debt_name: String,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub remaining_balance: f64,
}

/// Per-debt summary in snowball priority order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtOrderItem {
    pub debt_name: String,
    pub original_balance: f64,
    /// Month the debt reached zero (0 if it never did)
    pub payoff_month: u32,
    pub total_interest: f64,
}

/// Snowball calculator result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnowballResult {
    pub total_debt: f64,
    pub payoff_date: NaiveDate,
    pub total_interest_paid: f64,
    pub total_paid: f64,
    pub months_to_payoff: u32,
    pub payoff_schedule: Vec<PayoffScheduleItem>,
    pub debt_order: Vec<DebtOrderItem>,
}

/// Working state for one debt during the simulation
#[derive(Debug, Clone)]
struct DebtTracker<'a> {
    debt: &'a DebtItem,
    balance: f64,
    total_interest: f64,
    payoff_month: u32,
}

impl<'a> DebtTracker<'a> {
    fn new(debt: &'a DebtItem) -> Self {
        Self {
            debt,
            balance: debt.balance,
            total_interest: 0.0,
            payoff_month: 0,
        }
    }

    fn is_active(&self) -> bool {
        self.balance > 0.0
    }

    /// Accrue interest, apply `scheduled` payment and record the month
    fn apply_month(&mut self, month: u32, scheduled: f64) -> PayoffScheduleItem {
        let interest = self.balance * monthly_rate(self.debt.interest_rate);
        let payment = scheduled.min(self.balance + interest);
        let principal = payment - interest;
        let new_balance = settle((self.balance - principal).max(0.0));

        self.balance = new_balance;
        self.total_interest += interest;
        if new_balance == 0.0 && self.payoff_month == 0 {
            self.payoff_month = month;
        }

        PayoffScheduleItem {
            month,
            debt_name: self.debt.name.clone(),
            payment,
            principal,
            interest,
            remaining_balance: new_balance,
        }
    }
}

/// Simulate the snowball strategy
pub fn calculate_snowball(inputs: &SnowballInputs, config: &CalculatorConfig) -> Result<SnowballResult> {
    // Stable sort: equal balances keep their entry order
    let mut ordered: Vec<&DebtItem> = inputs.debts.iter().collect();
    ordered.sort_by(|a, b| a.balance.total_cmp(&b.balance));

    let mut trackers: Vec<DebtTracker> = ordered.into_iter().map(DebtTracker::new).collect();
    let mut schedule = Vec::new();
    let mut months_elapsed = 0;

    for month in 1..=config.snowball_max_months {
        let Some(target) = trackers.iter().position(DebtTracker::is_active) else {
            break;
        };
        months_elapsed = month;

        for (index, tracker) in trackers.iter_mut().enumerate() {
            if !tracker.is_active() {
                continue;
            }
            let scheduled = if index == target {
                tracker.debt.minimum_payment + inputs.extra_payment
            } else {
                tracker.debt.minimum_payment
            };
            schedule.push(tracker.apply_month(month, scheduled));
        }
    }

    if let Some(unpaid) = trackers.iter().find(|t| t.is_active()) {
        warn!(
            "Snowball plan for {} debts did not finish within {} months",
            trackers.len(),
            config.snowball_max_months
        );
        return Err(CalcError::payment_insufficient(
            format!("debt '{}'", unpaid.debt.name),
            config.snowball_max_months,
        ));
    }

    let total_debt: f64 = inputs.debts.iter().map(|d| d.balance).sum();
    let total_interest_paid: f64 = trackers.iter().map(|t| t.total_interest).sum();

    let debt_order = trackers
        .iter()
        .map(|t| DebtOrderItem {
            debt_name: t.debt.name.clone(),
            original_balance: t.debt.balance,
            payoff_month: t.payoff_month,
            total_interest: t.total_interest,
        })
        .collect();

    debug!(
        "Snowball: {} debts paid off in {} months, interest {:.2}",
        trackers.len(),
        months_elapsed,
        total_interest_paid
    );

    Ok(SnowballResult {
        total_debt,
        payoff_date: add_months(config.start_date, months_elapsed),
        total_interest_paid,
        total_paid: total_debt + total_interest_paid,
        months_to_payoff: months_elapsed,
        payoff_schedule: schedule,
        debt_order,
    })
}
