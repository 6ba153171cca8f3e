//! Finance Calculators CLI
//!
//! Runs one calculator from the command line and prints a summary

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use finance_calculators::debt::{load_debts, parse_debt_spec, SnowballInputs};
use finance_calculators::debt::{BalanceTransferInputs, BalanceTransferResult, SnowballResult};
use finance_calculators::format::{
    format_currency, format_duration_months, format_month_year, format_percentage,
};
use finance_calculators::mortgage::{
    BiweeklyMortgageInputs, BiweeklyMortgageResult, EarlyPayoffInputs, EarlyPayoffResult,
};
use finance_calculators::savings::{SavingsGoalInputs, SavingsGoalResult};
use finance_calculators::{
    CalculatorConfig, CalculatorRequest, CalculatorResponse, CalculatorRunner,
    ContributionFrequency, ExtraPaymentType,
};
use log::warn;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "finance_calculators",
    version,
    about = "Debt, mortgage and savings calculators"
)]
struct Cli {
    /// First month of every schedule (YYYY-MM-DD); defaults to today or CALC_START_DATE
    #[arg(long, global = true)]
    start_date: Option<NaiveDate>,

    /// Print the result as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Write schedule rows to a CSV file (snowball and savings-goal)
    #[arg(long, global = true)]
    schedule_csv: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pay debts smallest balance first; the extra payment goes to the smallest remaining debt
    Snowball {
        /// Debt as NAME:BALANCE:RATE:MINIMUM (repeatable)
        #[arg(long = "debt")]
        debts: Vec<String>,
        /// CSV file with name,balance,interestRate,minimumPayment columns
        #[arg(long, conflicts_with = "debts")]
        debts_file: Option<PathBuf>,
        /// Extra monthly payment applied to the smallest debt
        #[arg(long, default_value_t = 200.0)]
        extra: f64,
    },
    /// Compare the current card against a balance transfer offer
    BalanceTransfer {
        #[arg(long, default_value_t = 8_000.0)]
        balance: f64,
        /// Current card APR in percent
        #[arg(long, default_value_t = 22.5)]
        current_apr: f64,
        /// Promotional APR in percent
        #[arg(long, default_value_t = 0.0)]
        transfer_apr: f64,
        /// Transfer fee in percent of the balance
        #[arg(long, default_value_t = 3.0)]
        fee: f64,
        /// Promotional period in months
        #[arg(long, default_value_t = 18)]
        promo_months: u32,
        /// APR after the promotion in percent
        #[arg(long, default_value_t = 19.99)]
        post_promo_apr: f64,
        #[arg(long, default_value_t = 300.0)]
        payment: f64,
    },
    /// Compare monthly payments with half-payments every two weeks
    Biweekly {
        #[arg(long, default_value_t = 300_000.0)]
        amount: f64,
        /// APR in percent
        #[arg(long, default_value_t = 6.5)]
        rate: f64,
        /// Term in years
        #[arg(long, default_value_t = 30)]
        term: u32,
    },
    /// Savings from extra principal payments on a mortgage
    EarlyPayoff {
        #[arg(long, default_value_t = 250_000.0)]
        balance: f64,
        /// APR in percent
        #[arg(long, default_value_t = 6.5)]
        rate: f64,
        #[arg(long, default_value_t = 25)]
        years: u32,
        #[arg(long, default_value_t = 300.0)]
        extra: f64,
        #[arg(long, value_enum, default_value_t = ExtraPaymentType::Monthly)]
        extra_type: ExtraPaymentType,
    },
    /// Contribution needed to reach a savings goal
    SavingsGoal {
        #[arg(long, default_value_t = 50_000.0)]
        goal: f64,
        #[arg(long, default_value_t = 5_000.0)]
        current: f64,
        /// Timeframe in months
        #[arg(long, default_value_t = 36)]
        months: u32,
        /// Annual interest rate in percent
        #[arg(long, default_value_t = 4.5)]
        rate: f64,
        #[arg(long, value_enum, default_value_t = ContributionFrequency::Monthly)]
        frequency: ContributionFrequency,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = CalculatorConfig::from_env();
    if let Some(start_date) = cli.start_date {
        config.start_date = start_date;
    }

    let request = build_request(cli.command)?;
    let runner = CalculatorRunner::new(config);
    let response = runner
        .run_validated(&request)
        .with_context(|| format!("{} calculation failed", request.calculator_name()))?;

    if let Some(path) = &cli.schedule_csv {
        write_schedule(path, &response)?;
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_summary(&request, &response);
    }

    Ok(())
}

fn build_request(command: Commands) -> Result<CalculatorRequest> {
    let request = match command {
        Commands::Snowball {
            debts,
            debts_file,
            extra,
        } => {
            let debts = if let Some(path) = debts_file {
                load_debts(&path)
                    .with_context(|| format!("Failed to load debts from {}", path.display()))?
            } else if debts.is_empty() {
                SnowballInputs::default().debts
            } else {
                debts
                    .iter()
                    .map(|spec| parse_debt_spec(spec))
                    .collect::<Result<Vec<_>, _>>()?
            };
            CalculatorRequest::Snowball(SnowballInputs {
                debts,
                extra_payment: extra,
            })
        }
        Commands::BalanceTransfer {
            balance,
            current_apr,
            transfer_apr,
            fee,
            promo_months,
            post_promo_apr,
            payment,
        } => CalculatorRequest::BalanceTransfer(BalanceTransferInputs {
            current_balance: balance,
            current_apr,
            transfer_apr,
            transfer_fee: fee,
            promo_length: promo_months,
            post_promo_apr,
            monthly_payment: payment,
        }),
        Commands::Biweekly { amount, rate, term } => {
            CalculatorRequest::BiweeklyMortgage(BiweeklyMortgageInputs {
                loan_amount: amount,
                interest_rate: rate,
                loan_term: term,
            })
        }
        Commands::EarlyPayoff {
            balance,
            rate,
            years,
            extra,
            extra_type,
        } => CalculatorRequest::EarlyPayoff(EarlyPayoffInputs {
            current_balance: balance,
            interest_rate: rate,
            remaining_years: years,
            extra_payment: extra,
            extra_payment_type: extra_type,
        }),
        Commands::SavingsGoal {
            goal,
            current,
            months,
            rate,
            frequency,
        } => CalculatorRequest::SavingsGoal(SavingsGoalInputs {
            goal_amount: goal,
            current_savings: current,
            timeframe: months,
            interest_rate: rate,
            contribution_frequency: frequency,
        }),
    };
    Ok(request)
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    println!("Wrote {} schedule rows to {}", rows.len(), path.display());
    Ok(())
}

fn write_schedule(path: &Path, response: &CalculatorResponse) -> Result<()> {
    match response {
        CalculatorResponse::Snowball(result) => write_rows(path, &result.payoff_schedule),
        CalculatorResponse::SavingsGoal(result) => write_rows(path, &result.contribution_schedule),
        _ => {
            warn!("No schedule rows for this calculator; {} not written", path.display());
            Ok(())
        }
    }
}

fn print_summary(request: &CalculatorRequest, response: &CalculatorResponse) {
    match response {
        CalculatorResponse::Snowball(r) => print_snowball(r),
        CalculatorResponse::BalanceTransfer(r) => print_balance_transfer(r),
        CalculatorResponse::BiweeklyMortgage(r) => print_biweekly(r),
        CalculatorResponse::EarlyPayoff(r) => print_early_payoff(r),
        CalculatorResponse::SavingsGoal(r) => {
            let frequency = match request {
                CalculatorRequest::SavingsGoal(inputs) => inputs.contribution_frequency,
                _ => ContributionFrequency::Monthly,
            };
            print_savings_goal(r, frequency)
        }
    }
}

fn print_snowball(r: &SnowballResult) {
    println!("Debt Snowball");
    println!("=============\n");
    println!("Total debt:        {}", format_currency(r.total_debt));
    println!("Debt-free date:    {}", format_month_year(r.payoff_date));
    println!("Months to payoff:  {}", r.months_to_payoff);
    println!("Total interest:    {}", format_currency(r.total_interest_paid));
    println!("Total paid:        {}", format_currency(r.total_paid));
    println!();
    println!("{:<24} {:>14} {:>8} {:>14}", "Debt", "Balance", "Month", "Interest");
    println!("{}", "-".repeat(63));
    for item in &r.debt_order {
        println!(
            "{:<24} {:>14} {:>8} {:>14}",
            item.debt_name,
            format_currency(item.original_balance),
            item.payoff_month,
            format_currency(item.total_interest)
        );
    }
}

fn print_balance_transfer(r: &BalanceTransferResult) {
    println!("Balance Transfer");
    println!("================\n");
    println!("Transfer fee:             {}", format_currency(r.transfer_fee_amount));
    println!("Interest (current card):  {}", format_currency(r.current_interest));
    println!("Interest (transfer card): {}", format_currency(r.transfer_interest));
    println!("Total savings:            {}", format_currency(r.total_savings));
    println!("Months to payoff:         {}", r.payoff_months);
    println!("Paid off during promo:    {}", if r.will_payoff_during_promo { "yes" } else { "no" });
    println!("Balance after promo:      {}", format_currency(r.post_promo_balance));
    println!();
    if r.is_worth_it {
        println!("The transfer saves money.");
    } else {
        println!("The transfer does not save money.");
    }
}

fn print_biweekly(r: &BiweeklyMortgageResult) {
    println!("Biweekly Mortgage");
    println!("=================\n");
    println!("{:<18} {:>16} {:>16}", "", "Monthly", "Biweekly");
    println!(
        "{:<18} {:>16} {:>16}",
        "Payment",
        format_currency(r.monthly_payment),
        format_currency(r.biweekly_payment)
    );
    println!(
        "{:<18} {:>16} {:>16}",
        "Months to payoff", r.monthly_payoff_months, r.biweekly_payoff_months
    );
    println!(
        "{:<18} {:>16} {:>16}",
        "Total interest",
        format_currency(r.monthly_total_interest),
        format_currency(r.biweekly_total_interest)
    );
    println!();
    println!("Interest saved: {}", format_currency(r.interest_saved));
    println!("Time saved:     {}", format_duration_months(r.time_saved_months));
}

fn print_early_payoff(r: &EarlyPayoffResult) {
    println!("Early Mortgage Payoff");
    println!("=====================\n");
    println!("{:<16} {:>16} {:>16}", "", "Original", "With extras");
    println!(
        "{:<16} {:>16} {:>16}",
        "Payment",
        format_currency(r.original_payment),
        format_currency(r.new_payment)
    );
    println!(
        "{:<16} {:>16} {:>16}",
        "Payoff date",
        format_month_year(r.original_payoff_date),
        format_month_year(r.new_payoff_date)
    );
    println!(
        "{:<16} {:>16} {:>16}",
        "Total interest",
        format_currency(r.original_total_interest),
        format_currency(r.new_total_interest)
    );
    println!();
    println!("Interest saved: {}", format_currency(r.interest_saved));
    println!("Time saved:     {}", format_duration_months(r.time_saved_months));
}

fn print_savings_goal(r: &SavingsGoalResult, frequency: ContributionFrequency) {
    println!("Savings Goal");
    println!("============\n");
    println!(
        "Required contribution: {} {}",
        format_currency(r.required_contribution),
        frequency.label()
    );
    println!("Total contributions:   {}", format_currency(r.total_contributions));
    println!("Interest earned:       {}", format_currency(r.total_interest));
    println!("Final amount:          {}", format_currency(r.final_amount));
    println!();
    println!("{:>10} {:>16} {:>8}", "Milestone", "Amount", "Period");
    println!("{}", "-".repeat(36));
    for m in &r.milestones {
        let period = if m.period == 0 {
            "-".to_string()
        } else {
            m.period.to_string()
        };
        println!(
            "{:>10} {:>16} {:>8}",
            format_percentage(m.percentage as f64, 0),
            format_currency(m.amount),
            period
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_snowball_help_describes_extra_payment() {
        let cli = Cli::command();
        let snowball = cli.find_subcommand("snowball").unwrap();
        let about = snowball.get_about().unwrap().to_string();
        assert!(about.contains("smallest remaining debt"));
        assert!(!about.contains("freed"));
    }

    #[test]
    fn test_savings_goal_args() {
        let cli = Cli::try_parse_from([
            "finance_calculators",
            "savings-goal",
            "--goal",
            "12000",
            "--frequency",
            "weekly",
        ])
        .unwrap();
        match build_request(cli.command).unwrap() {
            CalculatorRequest::SavingsGoal(inputs) => {
                assert_eq!(inputs.goal_amount, 12_000.0);
                assert_eq!(inputs.contribution_frequency, ContributionFrequency::Weekly);
            }
            _ => panic!("expected a savings goal request"),
        }
    }
}
