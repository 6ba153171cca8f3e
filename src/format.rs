//! Display formatting for calculator output

use chrono::NaiveDate;

/// Format as US dollars with thousands separators, e.g. `$1,234.56`
pub fn format_currency(amount: f64) -> String {
    let formatted = format_number(amount.abs(), 2);
    if amount < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-${}", formatted)
    } else {
        format!("${}", formatted)
    }
}

/// Format a percentage value (already in percent units), e.g. `18.5%`
pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

/// Format with thousands separators and a fixed number of decimals
pub fn format_number(value: f64, decimals: usize) -> String {
    let raw = format!("{:.*}", decimals, value);
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Long month and year, e.g. `January 2027`
pub fn format_month_year(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Short month and year, e.g. `Jan 2027`
pub fn format_short_month_year(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// Split a month count into years and months, e.g. `2 years, 3 months`
pub fn format_duration_months(months: i64) -> String {
    let sign = if months < 0 { "-" } else { "" };
    let total = months.unsigned_abs();
    let years = total / 12;
    let rem = total % 12;

    let plural = |n: u64, unit: &str| {
        if n == 1 {
            format!("{} {}", n, unit)
        } else {
            format!("{} {}s", n, unit)
        }
    };

    match (years, rem) {
        (0, m) => format!("{}{}", sign, plural(m, "month")),
        (y, 0) => format!("{}{}", sign, plural(y, "year")),
        (y, m) => format!("{}{}, {}", sign, plural(y, "year"), plural(m, "month")),
    }
}

/// Parse user-entered money such as `$1,250.50`; unparsable input gives 0
pub fn parse_currency(value: &str) -> f64 {
    leading_number(value).unwrap_or(0.0)
}

/// Parse a percentage such as `18.5%` into a fraction (0.185); unparsable input gives 0
pub fn parse_percentage(value: &str) -> f64 {
    leading_number(value).unwrap_or(0.0) / 100.0
}

/// Strip everything but digits, `.` and `-`, then parse the longest numeric prefix
fn leading_number(value: &str) -> Option<f64> {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let mut end = 0;
    let mut seen_dot = false;
    for (i, ch) in cleaned.char_indices() {
        match ch {
            '-' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            c if c.is_ascii_digit() => {}
            _ => break,
        }
        end = i + ch.len_utf8();
    }

    cleaned[..end].parse().ok()
}
