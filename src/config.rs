//! Engine configuration: start date and iteration caps

use chrono::{Local, NaiveDate};
use log::warn;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Hard cap on snowball simulation months
pub const DEFAULT_SNOWBALL_MAX_MONTHS: u32 = 1000;

/// Hard cap on each balance transfer scenario
pub const DEFAULT_TRANSFER_MAX_MONTHS: u32 = 500;

/// Biweekly period cap as a multiple of the nominal term in months
pub const DEFAULT_BIWEEKLY_CAP_FACTOR: f64 = 2.5;

/// Accelerated payoff cap as a multiple of the remaining term in months
pub const DEFAULT_ACCELERATED_CAP_FACTOR: u32 = 2;

/// Configuration shared by all calculators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorConfig {
    /// Date payoff dates are counted from
    pub start_date: NaiveDate,

    /// Snowball simulation cap (months)
    pub snowball_max_months: u32,

    /// Balance transfer scenario cap (months)
    pub transfer_max_months: u32,

    /// Biweekly loop runs for at most `loan_term_years * 12 * factor` periods
    pub biweekly_cap_factor: f64,

    /// Accelerated payoff loop runs for at most `remaining_years * 12 * factor` periods
    pub accelerated_cap_factor: u32,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            start_date: Local::now().date_naive(),
            snowball_max_months: DEFAULT_SNOWBALL_MAX_MONTHS,
            transfer_max_months: DEFAULT_TRANSFER_MAX_MONTHS,
            biweekly_cap_factor: DEFAULT_BIWEEKLY_CAP_FACTOR,
            accelerated_cap_factor: DEFAULT_ACCELERATED_CAP_FACTOR,
        }
    }
}

impl CalculatorConfig {
    /// Default caps with a fixed start date
    pub fn starting(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            ..Default::default()
        }
    }

    /// Defaults overridden from `CALC_*` environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let start_date = env::var("CALC_START_DATE")
            .ok()
            .and_then(|s| match NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(e) => {
                    warn!("Ignoring CALC_START_DATE={:?}: {}", s, e);
                    None
                }
            })
            .unwrap_or(defaults.start_date);

        Self {
            start_date,
            snowball_max_months: env_or("CALC_SNOWBALL_MAX_MONTHS", defaults.snowball_max_months),
            transfer_max_months: env_or("CALC_TRANSFER_MAX_MONTHS", defaults.transfer_max_months),
            biweekly_cap_factor: env_or("CALC_BIWEEKLY_CAP_FACTOR", defaults.biweekly_cap_factor),
            accelerated_cap_factor: env_or(
                "CALC_ACCELERATED_CAP_FACTOR",
                defaults.accelerated_cap_factor,
            ),
        }
    }
}

/// Read and parse an environment variable, keeping the default when unset or malformed
fn env_or<T: FromStr + Copy>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("Ignoring {}={:?}: not a valid value", name, raw);
                default
            }
        },
        Err(_) => default,
    }
}
