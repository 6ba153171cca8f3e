//! Early mortgage payoff with extra principal payments

use crate::amortization::{add_months, LevelSchedule, MONTHS_PER_YEAR};
use crate::config::CalculatorConfig;
use crate::error::Result;
use crate::validation;
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// When the extra payment is made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ExtraPaymentType {
    /// Every month
    Monthly,
    /// Every 12th month
    Yearly,
    /// Once, with the first payment
    OneTime,
}

impl ExtraPaymentType {
    /// Extra amount added to the payment for a 1-indexed `period`
    pub fn extra_for(self, period: u32, extra_payment: f64) -> f64 {
        let applies = match self {
            ExtraPaymentType::Monthly => true,
            ExtraPaymentType::Yearly => period % MONTHS_PER_YEAR == 0,
            ExtraPaymentType::OneTime => period == 1,
        };
        if applies {
            extra_payment
        } else {
            0.0
        }
    }
}

impl fmt::Display for ExtraPaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExtraPaymentType::Monthly => "monthly",
            ExtraPaymentType::Yearly => "yearly",
            ExtraPaymentType::OneTime => "one-time",
        };
        f.write_str(label)
    }
}

/// Inputs to the early payoff calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarlyPayoffInputs {
    pub current_balance: f64,
    /// APR in percent
    pub interest_rate: f64,
    pub remaining_years: u32,
    #[serde(default)]
    pub extra_payment: f64,
    pub extra_payment_type: ExtraPaymentType,
}

impl Default for EarlyPayoffInputs {
    fn default() -> Self {
        Self {
            current_balance: 250_000.0,
            interest_rate: 6.5,
            remaining_years: 25,
            extra_payment: 300.0,
            extra_payment_type: ExtraPaymentType::Monthly,
        }
    }
}

impl EarlyPayoffInputs {
    pub fn validate(&self) -> Result<()> {
        validation::positive("Current balance", self.current_balance)?;
        validation::percentage("Interest rate", self.interest_rate)?;
        validation::positive_count("Remaining years", self.remaining_years, "years")?;
        validation::non_negative("Extra payment", self.extra_payment)
    }

    pub fn remaining_months(&self) -> u32 {
        self.remaining_years.saturating_mul(MONTHS_PER_YEAR)
    }
}

/// Early payoff calculator result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarlyPayoffResult {
    pub original_payment: f64,
    /// Recurring payment with extras; equals `original_payment` unless extras are monthly
    pub new_payment: f64,
    pub original_payoff_date: NaiveDate,
    pub new_payoff_date: NaiveDate,
    pub original_payoff_months: u32,
    pub new_payoff_months: u32,
    pub original_total_interest: f64,
    pub new_total_interest: f64,
    pub interest_saved: f64,
    pub time_saved_months: i64,
}

/// Quantify savings from extra principal payments
pub fn calculate_early_payoff(inputs: &EarlyPayoffInputs, config: &CalculatorConfig) -> Result<EarlyPayoffResult> {
    let total_months = inputs.remaining_months();
    let schedule = LevelSchedule::new(inputs.current_balance, inputs.interest_rate, total_months);
    let original_payment = schedule.payment();
    let original = schedule.run("original schedule");

    // Extras only shorten the term; the cap is a ceiling, not a horizon
    let accelerated_cap = total_months.saturating_mul(config.accelerated_cap_factor);
    let accelerated = schedule
        .run_with_extras("accelerated payoff", accelerated_cap, |period| {
            inputs
                .extra_payment_type
                .extra_for(period, inputs.extra_payment)
        })
        .into_paid_off()?;

    let new_payment = match inputs.extra_payment_type {
        ExtraPaymentType::Monthly => original_payment + inputs.extra_payment,
        ExtraPaymentType::Yearly | ExtraPaymentType::OneTime => original_payment,
    };

    debug!(
        "Early payoff ({}): {} -> {} months",
        inputs.extra_payment_type, original.periods, accelerated.periods
    );

    Ok(EarlyPayoffResult {
        original_payment,
        new_payment,
        original_payoff_date: add_months(config.start_date, original.periods),
        new_payoff_date: add_months(config.start_date, accelerated.periods),
        original_payoff_months: original.periods,
        new_payoff_months: accelerated.periods,
        original_total_interest: original.total_interest,
        new_total_interest: accelerated.total_interest,
        interest_saved: original.total_interest - accelerated.total_interest,
        time_saved_months: original.periods as i64 - accelerated.periods as i64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CalculatorConfig {
        CalculatorConfig::starting(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
    }

    #[test]
    fn test_monthly_extra_shortens_loan() {
        let result = calculate_early_payoff(&EarlyPayoffInputs::default(), &config()).unwrap();

        assert_eq!(result.original_payoff_months, 300);
        assert!(result.new_total_interest < result.original_total_interest);
        assert!(result.new_payoff_date < result.original_payoff_date);
        assert!((result.new_payment - result.original_payment - 300.0).abs() < 1e-9);
        assert_eq!(
            result.time_saved_months,
            300 - result.new_payoff_months as i64
        );
        assert_eq!(
            result.original_payoff_date,
            NaiveDate::from_ymd_opt(2050, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_yearly_and_one_time_keep_base_payment() {
        for kind in [ExtraPaymentType::Yearly, ExtraPaymentType::OneTime] {
            let inputs = EarlyPayoffInputs {
                extra_payment_type: kind,
                ..Default::default()
            };
            let result = calculate_early_payoff(&inputs, &config()).unwrap();
            assert_eq!(result.new_payment, result.original_payment);
            assert!(result.interest_saved > 0.0);
        }
    }

    #[test]
    fn test_monthly_saves_more_than_yearly_more_than_one_time() {
        let saved = |kind| {
            let inputs = EarlyPayoffInputs {
                extra_payment_type: kind,
                ..Default::default()
            };
            calculate_early_payoff(&inputs, &config()).unwrap().interest_saved
        };
        let monthly = saved(ExtraPaymentType::Monthly);
        let yearly = saved(ExtraPaymentType::Yearly);
        let one_time = saved(ExtraPaymentType::OneTime);
        assert!(monthly > yearly);
        assert!(yearly > one_time);
    }

    #[test]
    fn test_extra_schedule() {
        assert_eq!(ExtraPaymentType::Yearly.extra_for(11, 500.0), 0.0);
        assert_eq!(ExtraPaymentType::Yearly.extra_for(12, 500.0), 500.0);
        assert_eq!(ExtraPaymentType::Yearly.extra_for(24, 500.0), 500.0);
        assert_eq!(ExtraPaymentType::OneTime.extra_for(1, 500.0), 500.0);
        assert_eq!(ExtraPaymentType::OneTime.extra_for(2, 500.0), 0.0);
        assert_eq!(ExtraPaymentType::Monthly.extra_for(7, 500.0), 500.0);
    }

    #[test]
    fn test_no_extra_matches_original() {
        let inputs = EarlyPayoffInputs {
            extra_payment: 0.0,
            ..Default::default()
        };
        let result = calculate_early_payoff(&inputs, &config()).unwrap();
        assert_eq!(result.time_saved_months, 0);
        assert!(result.interest_saved.abs() < 1e-6);
    }

    #[test]
    fn test_zero_rate() {
        let inputs = EarlyPayoffInputs {
            current_balance: 60_000.0,
            interest_rate: 0.0,
            remaining_years: 5,
            extra_payment: 1_000.0,
            extra_payment_type: ExtraPaymentType::Monthly,
        };
        let result = calculate_early_payoff(&inputs, &config()).unwrap();
        assert_eq!(result.original_total_interest, 0.0);
        assert_eq!(result.new_total_interest, 0.0);
        // 60,000 / 2,000 per month
        assert_eq!(result.new_payoff_months, 30);
        assert_eq!(result.time_saved_months, 30);
    }

    #[test]
    fn test_no_extra_saves_nothing_across_rate_and_term_range() {
        for rate in [0.0, 3.0, 6.5, 25.0, 60.0, 100.0] {
            for years in [1, 10, 30, 40, 50] {
                let inputs = EarlyPayoffInputs {
                    current_balance: 300_000.0,
                    interest_rate: rate,
                    remaining_years: years,
                    extra_payment: 0.0,
                    extra_payment_type: ExtraPaymentType::Monthly,
                };
                let result = calculate_early_payoff(&inputs, &config()).unwrap();

                assert_eq!(result.original_payoff_months, years * 12, "rate {} years {}", rate, years);
                assert_eq!(result.new_payoff_months, years * 12, "rate {} years {}", rate, years);
                assert_eq!(result.time_saved_months, 0);
                assert_eq!(result.interest_saved, 0.0);
            }
        }
    }

    #[test]
    fn test_extreme_rate_with_extra_pays_off_early() {
        let inputs = EarlyPayoffInputs {
            current_balance: 300_000.0,
            interest_rate: 100.0,
            remaining_years: 50,
            extra_payment: 1_000.0,
            extra_payment_type: ExtraPaymentType::Monthly,
        };
        let result = calculate_early_payoff(&inputs, &config()).unwrap();

        assert_eq!(result.original_payoff_months, 600);
        assert!(result.new_payoff_months < 600);
        assert!(result.interest_saved > 0.0);
    }

    #[test]
    fn test_repeat_calls_identical() {
        for kind in [ExtraPaymentType::Monthly, ExtraPaymentType::Yearly, ExtraPaymentType::OneTime] {
            let inputs = EarlyPayoffInputs {
                extra_payment_type: kind,
                ..Default::default()
            };
            let first = calculate_early_payoff(&inputs, &config()).unwrap();
            let second = calculate_early_payoff(&inputs, &config()).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_huge_term_does_not_overflow() {
        let inputs = EarlyPayoffInputs {
            remaining_years: 400_000_000,
            ..Default::default()
        };
        assert_eq!(inputs.remaining_months(), u32::MAX);
    }

    #[test]
    fn test_payment_type_serde_names() {
        let json = serde_json::to_string(&ExtraPaymentType::OneTime).unwrap();
        assert_eq!(json, "\"one-time\"");
        let parsed: ExtraPaymentType = serde_json::from_str("\"yearly\"").unwrap();
        assert_eq!(parsed, ExtraPaymentType::Yearly);
    }
}
