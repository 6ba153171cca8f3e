//! Consumer debt calculators: snowball payoff and balance transfer comparison

mod balance_transfer;
pub mod loader;
mod snowball;

pub use balance_transfer::{calculate_balance_transfer, BalanceTransferInputs, BalanceTransferResult};
pub use loader::{load_debts, load_debts_from_reader, parse_debt_spec};
pub use snowball::{
    calculate_snowball, DebtItem, DebtOrderItem, PayoffScheduleItem, SnowballInputs, SnowballResult,
};
