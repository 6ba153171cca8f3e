//! Biweekly vs monthly mortgage payments
//!
//! Half the monthly payment every two weeks is 26 half-payments a year, one
//! extra monthly payment's worth. Modeled as 26 periods/year at APR/26 without
//! a day-accurate calendar.

use crate::amortization::{periodic_rate, LevelSchedule, PayoffLoop, MONTHS_PER_YEAR};
use crate::config::CalculatorConfig;
use crate::error::Result;
use crate::validation;
use log::debug;
use serde::{Deserialize, Serialize};

pub const BIWEEKLY_PERIODS_PER_YEAR: u32 = 26;

/// Inputs to the biweekly mortgage calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiweeklyMortgageInputs {
    pub loan_amount: f64,
    /// APR in percent
    pub interest_rate: f64,
    /// Loan term in years
    pub loan_term: u32,
}

impl Default for BiweeklyMortgageInputs {
    fn default() -> Self {
        Self {
            loan_amount: 300_000.0,
            interest_rate: 6.5,
            loan_term: 30,
        }
    }
}

impl BiweeklyMortgageInputs {
    pub fn validate(&self) -> Result<()> {
        validation::positive("Loan amount", self.loan_amount)?;
        validation::percentage("Interest rate", self.interest_rate)?;
        validation::positive_count("Loan term", self.loan_term, "years")
    }

    pub fn term_months(&self) -> u32 {
        self.loan_term.saturating_mul(MONTHS_PER_YEAR)
    }
}

/// Biweekly mortgage calculator result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiweeklyMortgageResult {
    pub monthly_payment: f64,
    pub biweekly_payment: f64,
    pub monthly_payoff_months: u32,
    /// Biweekly periods converted to months, rounded up
    pub biweekly_payoff_months: u32,
    pub monthly_total_interest: f64,
    pub biweekly_total_interest: f64,
    pub interest_saved: f64,
    pub time_saved_months: i64,
    /// Whole years in `time_saved_months`
    pub time_saved_years: i64,
}

/// Convert a count of biweekly periods to calendar months (periods / (26/12)), rounding up
pub fn biweekly_periods_to_months(periods: u32) -> u32 {
    let scaled = periods as u64 * MONTHS_PER_YEAR as u64;
    let per_year = BIWEEKLY_PERIODS_PER_YEAR as u64;
    ((scaled + per_year - 1) / per_year) as u32
}

/// Compare a standard monthly schedule with half-payments every two weeks
pub fn calculate_biweekly_mortgage(
    inputs: &BiweeklyMortgageInputs,
    config: &CalculatorConfig,
) -> Result<BiweeklyMortgageResult> {
    let term_months = inputs.term_months();
    let schedule = LevelSchedule::new(inputs.loan_amount, inputs.interest_rate, term_months);
    let monthly_payment = schedule.payment();
    let monthly = schedule.run("monthly schedule");

    let biweekly_payment = monthly_payment / 2.0;
    let biweekly_rate = periodic_rate(inputs.interest_rate, BIWEEKLY_PERIODS_PER_YEAR);
    let biweekly_cap = (term_months as f64 * config.biweekly_cap_factor) as u32;
    let biweekly = PayoffLoop::new("biweekly schedule", inputs.loan_amount, biweekly_cap)
        .simulate(|_| biweekly_rate, |_| biweekly_payment)
        .into_paid_off()?;

    let biweekly_payoff_months = biweekly_periods_to_months(biweekly.periods);
    let interest_saved = monthly.total_interest - biweekly.total_interest;
    let time_saved_months = monthly.periods as i64 - biweekly_payoff_months as i64;

    debug!(
        "Biweekly mortgage: monthly {} months, biweekly {} periods ({} months)",
        monthly.periods, biweekly.periods, biweekly_payoff_months
    );

    Ok(BiweeklyMortgageResult {
        monthly_payment,
        biweekly_payment,
        monthly_payoff_months: monthly.periods,
        biweekly_payoff_months,
        monthly_total_interest: monthly.total_interest,
        biweekly_total_interest: biweekly.total_interest,
        interest_saved,
        time_saved_months,
        time_saved_years: time_saved_months.div_euclid(12),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn config() -> CalculatorConfig {
        CalculatorConfig::starting(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
    }

    #[test]
    fn test_thirty_year_example() {
        let result = calculate_biweekly_mortgage(&BiweeklyMortgageInputs::default(), &config()).unwrap();

        assert!((result.monthly_payment - 1896.20).abs() < 0.01);
        assert!((result.biweekly_payment - result.monthly_payment / 2.0).abs() < 1e-12);
        assert_eq!(result.monthly_payoff_months, 360);
        assert!(result.biweekly_payoff_months < 360);
        assert!(result.interest_saved > 0.0);
        assert_eq!(
            result.time_saved_months,
            360 - result.biweekly_payoff_months as i64
        );
        assert_eq!(result.time_saved_years, result.time_saved_months / 12);
    }

    #[test]
    fn test_biweekly_never_worse() {
        for (amount, rate, term) in [(150_000.0, 3.0, 15), (420_000.0, 7.25, 30), (90_000.0, 12.0, 20)] {
            let inputs = BiweeklyMortgageInputs {
                loan_amount: amount,
                interest_rate: rate,
                loan_term: term,
            };
            let result = calculate_biweekly_mortgage(&inputs, &config()).unwrap();
            assert!(result.biweekly_payoff_months <= result.monthly_payoff_months);
            assert!(result.biweekly_total_interest <= result.monthly_total_interest);
        }
    }

    #[test]
    fn test_zero_rate() {
        let inputs = BiweeklyMortgageInputs {
            loan_amount: 120_000.0,
            interest_rate: 0.0,
            loan_term: 10,
        };
        let result = calculate_biweekly_mortgage(&inputs, &config()).unwrap();

        assert_eq!(result.monthly_total_interest, 0.0);
        assert_eq!(result.biweekly_total_interest, 0.0);
        assert_eq!(result.monthly_payoff_months, 120);
        // 240 half-payments at 26 per year = 110.77 months
        assert_eq!(result.biweekly_payoff_months, 111);
        assert_eq!(result.time_saved_months, 9);
        assert_eq!(result.time_saved_years, 0);
    }

    #[test]
    fn test_interest_only_payment_keeps_full_term() {
        // At 100% over 50 years the level payment rounds to pure interest
        let inputs = BiweeklyMortgageInputs {
            loan_amount: 300_000.0,
            interest_rate: 100.0,
            loan_term: 50,
        };
        let result = calculate_biweekly_mortgage(&inputs, &config()).unwrap();

        assert_eq!(result.monthly_payoff_months, 600);
        assert!(result.monthly_total_interest > 0.0);
        assert!(result.biweekly_payoff_months < 600);
        assert!(result.interest_saved > 0.0);
        assert!(result.time_saved_months > 0);
    }

    #[test]
    fn test_biweekly_never_worse_across_rate_and_term_range() {
        for rate in [0.0, 0.5, 3.0, 6.5, 12.0, 25.0, 50.0, 75.0, 100.0] {
            for term in [1, 5, 15, 30, 40, 50] {
                let inputs = BiweeklyMortgageInputs {
                    loan_amount: 300_000.0,
                    interest_rate: rate,
                    loan_term: term,
                };
                let result = calculate_biweekly_mortgage(&inputs, &config()).unwrap();

                assert_eq!(result.monthly_payoff_months, term * 12, "rate {} term {}", rate, term);
                assert!(
                    result.biweekly_payoff_months <= result.monthly_payoff_months,
                    "rate {} term {}",
                    rate,
                    term
                );
                assert!(
                    result.biweekly_total_interest <= result.monthly_total_interest,
                    "rate {} term {}",
                    rate,
                    term
                );
                assert!(result.time_saved_months >= 0);
            }
        }
    }

    #[test]
    fn test_repeat_calls_identical() {
        let inputs = BiweeklyMortgageInputs::default();
        let first = calculate_biweekly_mortgage(&inputs, &config()).unwrap();
        let second = calculate_biweekly_mortgage(&inputs, &config()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_huge_term_does_not_overflow() {
        let inputs = BiweeklyMortgageInputs {
            loan_term: u32::MAX,
            ..Default::default()
        };
        assert_eq!(inputs.term_months(), u32::MAX);
    }

    #[test]
    fn test_periods_to_months() {
        assert_eq!(biweekly_periods_to_months(26), 12);
        assert_eq!(biweekly_periods_to_months(27), 13);
        assert_eq!(biweekly_periods_to_months(0), 0);
    }

    #[test]
    fn test_validate() {
        assert!(BiweeklyMortgageInputs::default().validate().is_ok());
        let inputs = BiweeklyMortgageInputs {
            loan_term: 0,
            ..Default::default()
        };
        assert_eq!(
            inputs.validate().unwrap_err().to_string(),
            "Loan term must be greater than 0 years"
        );
    }
}
