//! Core data models for the expense tracker
//!
//! This module contains the data structures of the expense domain: the
//! expense record, its id, money amounts and the calendar month used to
//! bucket expenses.

pub mod amount;
pub mod expense;
pub mod ids;
pub mod money;
pub mod month;

pub use amount::{format_currency, parse_amount_input, AmountInput};
pub use expense::{parse_date, Expense};
pub use ids::ExpenseId;
pub use money::{CurrencyFormat, Money};
pub use month::{Month, MonthParseError};
