//! Load debt lists from CSV or command-line specs

use super::DebtItem;
use crate::error::{CalcError, Result};
use csv::{ReaderBuilder, Trim};
use std::path::Path;

/// Raw CSV row: `name,balance,interest_rate,minimum_payment`
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(alias = "Name")]
    name: String,
    #[serde(alias = "Balance")]
    balance: f64,
    #[serde(alias = "InterestRate", alias = "interestRate", alias = "apr")]
    interest_rate: f64,
    #[serde(alias = "MinimumPayment", alias = "minimumPayment", alias = "min_payment")]
    minimum_payment: f64,
}

impl From<CsvRow> for DebtItem {
    fn from(row: CsvRow) -> Self {
        DebtItem::new(row.name, row.balance, row.interest_rate, row.minimum_payment)
    }
}

/// Load debts from a CSV file with a header row
pub fn load_debts<P: AsRef<Path>>(path: P) -> Result<Vec<DebtItem>> {
    let file = std::fs::File::open(path)?;
    load_debts_from_reader(file)
}

/// Load debts from any reader (e.g., string buffer, stdin)
pub fn load_debts_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<DebtItem>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut debts = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        debts.push(row.into());
    }

    Ok(debts)
}

/// Parse `NAME:BALANCE:RATE:MINIMUM`, e.g. `Visa:3000:18.5:75`
pub fn parse_debt_spec(spec: &str) -> Result<DebtItem> {
    let parts: Vec<&str> = spec.rsplitn(4, ':').collect();
    if parts.len() != 4 {
        return Err(CalcError::invalid(format!(
            "Invalid debt '{}': expected NAME:BALANCE:RATE:MINIMUM",
            spec
        )));
    }

    // rsplitn yields fields right to left; the name may itself contain ':'
    let number = |field: &str, raw: &str| -> Result<f64> {
        raw.trim().parse().map_err(|_| {
            CalcError::invalid(format!("Invalid {} '{}' in debt '{}'", field, raw, spec))
        })
    };

    Ok(DebtItem::new(
        parts[3].trim(),
        number("balance", parts[2])?,
        number("interest rate", parts[1])?,
        number("minimum payment", parts[0])?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_debts_from_reader() {
        let data = "name,balance,interest_rate,minimum_payment\n\
                    Credit Card 1, 3000, 18.5, 75\n\
                    Car Loan,12000,6.9,310\n";
        let debts = load_debts_from_reader(data.as_bytes()).unwrap();

        assert_eq!(debts.len(), 2);
        assert_eq!(debts[0], DebtItem::new("Credit Card 1", 3_000.0, 18.5, 75.0));
        assert_eq!(debts[1].name, "Car Loan");
        assert_eq!(debts[1].minimum_payment, 310.0);
    }

    #[test]
    fn test_load_debts_camel_case_header() {
        let data = "name,balance,interestRate,minimumPayment\nVisa,500,20,25\n";
        let debts = load_debts_from_reader(data.as_bytes()).unwrap();
        assert_eq!(debts[0].interest_rate, 20.0);
    }

    #[test]
    fn test_load_debts_bad_number() {
        let data = "name,balance,interest_rate,minimum_payment\nVisa,lots,20,25\n";
        let err = load_debts_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, CalcError::Csv(_)));
    }

    #[test]
    fn test_parse_debt_spec() {
        let debt = parse_debt_spec("Visa:3000:18.5:75").unwrap();
        assert_eq!(debt, DebtItem::new("Visa", 3_000.0, 18.5, 75.0));

        let debt = parse_debt_spec("Store: Card:200:25:15").unwrap();
        assert_eq!(debt.name, "Store: Card");

        assert!(parse_debt_spec("Visa:3000:18.5").is_err());
        assert!(parse_debt_spec("Visa:x:18.5:75").is_err());
    }
}
