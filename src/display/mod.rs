//! Display formatting for terminal output
//!
//! Turns tracker state into plain text for the interactive shell.

pub mod expense;

pub use expense::{
    format_expense_details, format_expense_row, format_month_summary, format_month_view,
    format_validation_errors,
};
