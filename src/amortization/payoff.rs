//! Bounded single-balance payoff loop
//!
//! Every single-debt simulator (card payoff, biweekly schedules) runs the same
//! period loop: accrue interest on the opening balance, apply the period's
//! payment, never let the balance cross zero. The loop is bounded by an
//! explicit cap; running out of periods is reported, not looped forever.

use crate::error::{CalcError, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Balances at or below this are treated as fully repaid
pub const BALANCE_EPSILON: f64 = 1e-6;

/// Clamp a post-payment balance: residue below `BALANCE_EPSILON` (or negative) becomes 0
pub fn settle(balance: f64) -> f64 {
    if balance <= BALANCE_EPSILON {
        0.0
    } else {
        balance
    }
}

/// Outcome of a payoff loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffRun {
    /// Scenario label used in error messages
    pub scenario: String,
    /// Number of periods in which a payment was made
    pub periods: u32,
    pub total_interest: f64,
    /// Balance left when the loop stopped (0 when repaid)
    pub remaining_balance: f64,
    /// True when the loop stopped because a payment did not cover its interest
    pub stalled: bool,
    /// Cap the loop ran under
    pub max_periods: u32,
}

impl PayoffRun {
    pub fn is_paid_off(&self) -> bool {
        self.remaining_balance <= 0.0
    }

    /// Reject a run that stalled or exhausted its cap with balance outstanding
    pub fn into_paid_off(self) -> Result<Self> {
        if self.stalled || !self.is_paid_off() {
            warn!(
                "{}: balance {:.2} outstanding after {} periods (cap {})",
                self.scenario, self.remaining_balance, self.periods, self.max_periods
            );
            return Err(CalcError::payment_insufficient(
                self.scenario,
                self.max_periods,
            ));
        }
        Ok(self)
    }
}

/// Single-balance payoff simulation bounded by `max_periods`
#[derive(Debug, Clone)]
pub struct PayoffLoop {
    scenario: String,
    opening_balance: f64,
    max_periods: u32,
    stop_on_stall: bool,
}

impl PayoffLoop {
    pub fn new(scenario: impl Into<String>, opening_balance: f64, max_periods: u32) -> Self {
        Self {
            scenario: scenario.into(),
            opening_balance,
            max_periods,
            stop_on_stall: false,
        }
    }

    /// Stop at the first period whose payment does not cover its interest
    pub fn stop_on_stall(mut self) -> Self {
        self.stop_on_stall = true;
        self
    }

    /// Run the loop.
    ///
    /// `rate_for(period)` gives the periodic interest rate and
    /// `payment_for(period)` the scheduled payment for a 1-indexed period.
    /// Principal is capped at the outstanding balance so the crossing period
    /// lands exactly on zero. A payment short of the interest grows the
    /// balance and the loop carries on to the cap, unless `stop_on_stall`
    /// was requested.
    pub fn simulate<R, P>(&self, mut rate_for: R, mut payment_for: P) -> PayoffRun
    where
        R: FnMut(u32) -> f64,
        P: FnMut(u32) -> f64,
    {
        let mut balance = self.opening_balance;
        let mut total_interest = 0.0;
        let mut periods = 0;
        let mut stalled = false;

        for period in 1..=self.max_periods {
            if balance <= 0.0 {
                break;
            }

            let interest = balance * rate_for(period);
            let principal = (payment_for(period) - interest).min(balance);
            if self.stop_on_stall && principal <= 0.0 {
                stalled = true;
                break;
            }

            balance = settle(balance - principal);
            total_interest += interest;
            periods = period;
        }

        debug!(
            "{}: {} periods, interest {:.2}, remaining {:.2}",
            self.scenario, periods, total_interest, balance
        );

        PayoffRun {
            scenario: self.scenario.clone(),
            periods,
            total_interest,
            remaining_balance: balance,
            stalled,
            max_periods: self.max_periods,
        }
    }
}
