//! Mortgage calculators: biweekly payments and early payoff

mod biweekly;
mod early_payoff;

pub use biweekly::{
    biweekly_periods_to_months, calculate_biweekly_mortgage, BiweeklyMortgageInputs,
    BiweeklyMortgageResult, BIWEEKLY_PERIODS_PER_YEAR,
};
pub use early_payoff::{calculate_early_payoff, EarlyPayoffInputs, EarlyPayoffResult, ExtraPaymentType};
