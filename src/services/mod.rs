//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the in-memory store,
//! handling validation and audit records.

pub mod expense;

pub use expense::{validate_input, ExpenseInput, ExpenseService, ValidatedInput};
