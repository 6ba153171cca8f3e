//! Fixed-term level-payment schedules
//!
//! The balance a level-payment loan owes after period `k` is the present
//! value of the payments still due. Reading the scheduled balance off that
//! closed form, instead of stepping `B * (1+i) - payment` forward, keeps the
//! schedule exactly `months` long: the forward recursion amplifies rounding
//! by `(1+i)^n`, which at high rates and long terms is larger than the
//! balance itself.
//!
//! Prepayments are tracked as their own compounded balance and subtracted
//! from the scheduled balance, which is the same amortization with the
//! extras applied to principal.

use super::payment::{discount_factor, level_payment, monthly_rate};
use super::payoff::{settle, PayoffRun};
use log::debug;

/// A loan amortized by a level monthly payment over a fixed term
#[derive(Debug, Clone)]
pub struct LevelSchedule {
    principal: f64,
    rate: f64,
    months: u32,
    payment: f64,
}

impl LevelSchedule {
    /// `annual_rate_percent` is the APR in percent; `months > 0`
    pub fn new(principal: f64, annual_rate_percent: f64, months: u32) -> Self {
        Self {
            principal,
            rate: monthly_rate(annual_rate_percent),
            months,
            payment: level_payment(principal, annual_rate_percent, months),
        }
    }

    pub fn payment(&self) -> f64 {
        self.payment
    }

    /// Scheduled balance after `period` level payments, 0 from the final period on
    pub fn balance_after(&self, period: u32) -> f64 {
        if period == 0 {
            return self.principal;
        }
        if period >= self.months {
            return 0.0;
        }

        let remaining = self.months - period;
        if self.rate == 0.0 {
            self.principal * remaining as f64 / self.months as f64
        } else {
            self.payment * (1.0 - discount_factor(self.rate, remaining)) / self.rate
        }
    }

    /// Run the schedule with no prepayments; always `months` periods long
    pub fn run(&self, scenario: impl Into<String>) -> PayoffRun {
        self.run_with_extras(scenario, self.months, |_| 0.0)
    }

    /// Run the schedule with `extra_for(period)` applied to principal on top
    /// of the level payment, for at most `max_periods` periods.
    ///
    /// Extras never lengthen the schedule, so a cap at or above `months`
    /// always ends paid off.
    pub fn run_with_extras<E>(&self, scenario: impl Into<String>, max_periods: u32, mut extra_for: E) -> PayoffRun
    where
        E: FnMut(u32) -> f64,
    {
        let scenario = scenario.into();
        let mut balance = self.principal;
        let mut prepaid = 0.0;
        let mut total_interest = 0.0;
        let mut periods = 0;

        for period in 1..=max_periods {
            if balance <= 0.0 {
                break;
            }

            total_interest += balance * self.rate;
            prepaid = prepaid * (1.0 + self.rate) + extra_for(period);
            // min keeps the balance non-increasing through rounding in the closed form
            balance = settle((self.balance_after(period) - prepaid).min(balance));
            periods = period;
        }

        debug!(
            "{}: {} of {} scheduled periods, interest {:.2}, remaining {:.2}",
            scenario, periods, self.months, total_interest, balance
        );

        PayoffRun {
            scenario,
            periods,
            total_interest,
            remaining_balance: balance,
            stalled: false,
            max_periods,
        }
    }
}
