//! Caller-side input checks
//!
//! The calculators assume in-range inputs. These checks run before a
//! calculation and produce the user-facing message for the first violation.

use crate::amortization::monthly_rate;
use crate::error::{CalcError, Result};
use crate::format::format_currency;

/// `value` must be a finite number greater than zero
pub fn positive(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid(format!("{} must be greater than $0", field)));
    }
    Ok(())
}

/// `value` must be a percentage between 0 and 100 inclusive
pub fn percentage(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(CalcError::invalid(format!(
            "{} must be between 0% and 100%",
            field
        )));
    }
    Ok(())
}

/// `value` must not be negative
pub fn non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::invalid(format!("{} cannot be negative", field)));
    }
    Ok(())
}

/// `value` must be at least `min` dollars
pub fn at_least(field: &str, value: f64, min: f64) -> Result<()> {
    if !value.is_finite() || value < min {
        return Err(CalcError::invalid(format!(
            "{} must be at least {}",
            field,
            format_currency(min)
        )));
    }
    Ok(())
}

/// A whole-number count (months, years) must be greater than zero
pub fn positive_count(field: &str, value: u32, unit: &str) -> Result<()> {
    if value == 0 {
        return Err(CalcError::invalid(format!(
            "{} must be greater than 0 {}",
            field, unit
        )));
    }
    Ok(())
}

/// The first month's payment must exceed the first month's interest charge
pub fn minimum_payment_covers_interest(
    name: &str,
    balance: f64,
    annual_rate_percent: f64,
    minimum_payment: f64,
) -> Result<()> {
    let monthly_interest = balance * monthly_rate(annual_rate_percent);
    if minimum_payment <= monthly_interest {
        return Err(CalcError::invalid(format!(
            "{}: Minimum payment ({}) must be greater than monthly interest ({})",
            name,
            format_currency(minimum_payment),
            format_currency(monthly_interest)
        )));
    }
    Ok(())
}
