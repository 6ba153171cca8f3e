//! Level-payment (annuity) formula and periodic rate conversion

pub const MONTHS_PER_YEAR: u32 = 12;

/// Periodic rate for an APR given in percent, e.g. `periodic_rate(6.0, 12) == 0.005`
pub fn periodic_rate(annual_rate_percent: f64, periods_per_year: u32) -> f64 {
    annual_rate_percent / 100.0 / periods_per_year as f64
}

/// Monthly rate for an APR given in percent
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    periodic_rate(annual_rate_percent, MONTHS_PER_YEAR)
}

/// Present value of 1 due `periods` periods from now at `rate` per period
pub fn discount_factor(rate: f64, periods: u32) -> f64 {
    (1.0 + rate).powf(-(periods as f64))
}

/// Level monthly payment that fully amortizes `principal` over `months` periods.
///
/// Uses `P * i / (1 - (1+i)^-n)` with `i = APR/12/100`, falling back
/// to straight-line `P / n` when the rate is exactly zero. Callers guarantee
/// `principal > 0` and `months > 0`.
pub fn level_payment(principal: f64, annual_rate_percent: f64, months: u32) -> f64 {
    let rate = monthly_rate(annual_rate_percent);
    if rate == 0.0 {
        return principal / months as f64;
    }

    principal * rate / (1.0 - discount_factor(rate, months))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_thirty_year_mortgage_payment() {
        // $300k at 6.5% over 30 years
        let payment = level_payment(300_000.0, 6.5, 360);
        assert!((payment - 1896.20).abs() < 0.01, "got {}", payment);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let payment = level_payment(12_000.0, 0.0, 24);
        assert_relative_eq!(payment, 500.0);
    }

    #[test]
    fn test_single_period_repays_principal_plus_interest() {
        // One period: payment = P * (1 + i)
        let payment = level_payment(1_000.0, 12.0, 1);
        assert_relative_eq!(payment, 1_010.0, epsilon = 1e-9);
    }

    #[test]
    fn test_long_high_rate_term_tends_to_interest_only() {
        // (1 + 100%/12)^600 is far beyond f64 precision
        let payment = level_payment(300_000.0, 100.0, 600);
        assert!(payment.is_finite());
        assert_relative_eq!(payment, 300_000.0 * monthly_rate(100.0), max_relative = 1e-12);

        let huge = level_payment(1_000.0, 5.0, u32::MAX);
        assert!(huge.is_finite());
    }

    #[test]
    fn test_discount_factor() {
        assert_eq!(discount_factor(0.05, 0), 1.0);
        assert_relative_eq!(discount_factor(0.05, 2), 1.0 / 1.1025, epsilon = 1e-12);
    }

    #[test]
    fn test_periodic_rate() {
        assert_relative_eq!(periodic_rate(6.0, 12), 0.005);
        assert_relative_eq!(periodic_rate(5.2, 26), 0.002);
        assert_relative_eq!(monthly_rate(18.0), 0.015);
    }
}
