//! Savings goal planning
//!
//! Solves the future-value-of-annuity equation for the level contribution that
//! reaches the goal, then projects the balance forward to find when 25%, 50%,
//! 75% and 100% of the goal are reached.
//!
//! Savings projections are not dated, so the calculator takes a
//! `CalculatorConfig` only to share the signature of the other calculators.

use crate::amortization::{periodic_rate, BALANCE_EPSILON, MONTHS_PER_YEAR};
use crate::config::CalculatorConfig;
use crate::error::{CalcError, Result};
use crate::validation;
use log::debug;
use serde::{Deserialize, Serialize};

/// Goal fractions reported as milestones
pub const MILESTONE_PERCENTAGES: [u32; 4] = [25, 50, 75, 100];

/// How often contributions are made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ContributionFrequency {
    Monthly,
    Biweekly,
    Weekly,
}

impl ContributionFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            ContributionFrequency::Monthly => 12,
            ContributionFrequency::Biweekly => 26,
            ContributionFrequency::Weekly => 52,
        }
    }

    /// Suffix for displaying a per-period amount
    pub fn label(self) -> &'static str {
        match self {
            ContributionFrequency::Monthly => "per month",
            ContributionFrequency::Biweekly => "per 2 weeks",
            ContributionFrequency::Weekly => "per week",
        }
    }
}

/// Inputs to the savings goal calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoalInputs {
    pub goal_amount: f64,
    #[serde(default)]
    pub current_savings: f64,
    /// Months available to reach the goal
    pub timeframe: u32,
    /// Annual rate in percent
    pub interest_rate: f64,
    pub contribution_frequency: ContributionFrequency,
}

impl Default for SavingsGoalInputs {
    fn default() -> Self {
        Self {
            goal_amount: 50_000.0,
            current_savings: 5_000.0,
            timeframe: 36,
            interest_rate: 4.5,
            contribution_frequency: ContributionFrequency::Monthly,
        }
    }
}

impl SavingsGoalInputs {
    pub fn validate(&self) -> Result<()> {
        validation::positive("Goal amount", self.goal_amount)?;
        validation::non_negative("Current savings", self.current_savings)?;
        if self.current_savings >= self.goal_amount {
            return Err(CalcError::invalid(
                "Current savings must be less than your goal amount",
            ));
        }
        validation::positive_count("Timeframe", self.timeframe, "months")?;
        validation::percentage("Interest rate", self.interest_rate)
    }

    /// Number of contribution periods in the timeframe (rounded down)
    pub fn total_periods(&self) -> u32 {
        let per_year = self.contribution_frequency.periods_per_year();
        ((self.timeframe as u64 * per_year as u64) / MONTHS_PER_YEAR as u64) as u32
    }
}

/// One projected contribution period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionItem {
    pub period: u32,
    pub contribution: f64,
    pub interest: f64,
    /// Balance after interest and contribution
    pub balance: f64,
}

/// First period at which a fraction of the goal is reached
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub percentage: u32,
    /// 0 when not reached within the timeframe
    pub period: u32,
    pub amount: f64,
}

/// Savings goal calculator result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoalResult {
    pub required_contribution: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
    pub final_amount: f64,
    pub contribution_schedule: Vec<ContributionItem>,
    pub milestones: Vec<Milestone>,
}

/// Level contribution that grows `current` into `goal` over `periods` at `rate` per period.
///
/// `(goal - current*(1+r)^n) / (((1+r)^n - 1) / r)`, or `(goal - current) / n`
/// when the rate is zero. Never negative.
pub fn required_contribution(goal: f64, current: f64, rate: f64, periods: u32) -> f64 {
    let required = if rate == 0.0 {
        (goal - current) / periods as f64
    } else {
        let growth = (1.0 + rate).powi(periods as i32);
        let future_value_of_current = current * growth;
        let annuity_factor = (growth - 1.0) / rate;
        (goal - future_value_of_current) / annuity_factor
    };

    required.max(0.0)
}

/// Project the balance forward one period at a time
fn project(current: f64, rate: f64, contribution: f64, periods: u32) -> Vec<ContributionItem> {
    let mut balance = current;
    (1..=periods)
        .map(|period| {
            let interest = balance * rate;
            balance += interest + contribution;
            ContributionItem {
                period,
                contribution,
                interest,
                balance,
            }
        })
        .collect()
}

/// First schedule period at or above each milestone fraction of `goal`
fn find_milestones(goal: f64, schedule: &[ContributionItem]) -> Vec<Milestone> {
    MILESTONE_PERCENTAGES
        .iter()
        .map(|&percentage| {
            let amount = goal * percentage as f64 / 100.0;
            let period = schedule
                .iter()
                .find(|item| item.balance + BALANCE_EPSILON >= amount)
                .map(|item| item.period)
                .unwrap_or(0);
            Milestone {
                percentage,
                period,
                amount,
            }
        })
        .collect()
}

/// Solve for the required contribution and project milestones
pub fn calculate_savings_goal(inputs: &SavingsGoalInputs, _config: &CalculatorConfig) -> Result<SavingsGoalResult> {
    let total_periods = inputs.total_periods();
    if total_periods == 0 {
        return Err(CalcError::invalid(
            "Timeframe is too short for a single contribution period",
        ));
    }

    let rate = periodic_rate(
        inputs.interest_rate,
        inputs.contribution_frequency.periods_per_year(),
    );
    let contribution =
        required_contribution(inputs.goal_amount, inputs.current_savings, rate, total_periods);

    let schedule = project(inputs.current_savings, rate, contribution, total_periods);
    let milestones = find_milestones(inputs.goal_amount, &schedule);

    let total_contributions = contribution * total_periods as f64;
    let final_amount = schedule
        .last()
        .map(|item| item.balance)
        .unwrap_or(inputs.goal_amount);
    let total_interest = final_amount - inputs.current_savings - total_contributions;

    debug!(
        "Savings goal: {:.2} over {} periods, final {:.2}",
        contribution, total_periods, final_amount
    );

    Ok(SavingsGoalResult {
        required_contribution: contribution,
        total_contributions,
        total_interest,
        final_amount,
        contribution_schedule: schedule,
        milestones,
    })
}
