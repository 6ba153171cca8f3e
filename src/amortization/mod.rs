//! Shared amortization primitives used by every calculator

mod calendar;
mod payment;
mod payoff;
mod schedule;

pub use calendar::add_months;
pub use payment::{discount_factor, level_payment, monthly_rate, periodic_rate, MONTHS_PER_YEAR};
pub use payoff::{settle, PayoffLoop, PayoffRun, BALANCE_EPSILON};
pub use schedule::LevelSchedule;
