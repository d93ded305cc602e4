//! Expense Tracker - monthly bill tracking
//!
//! This library provides an in-memory expense engine: add, edit, mark paid
//! and delete expenses, and browse them month by month. A presentation layer
//! (the bundled interactive shell, or any other front end) drives it through
//! [`ExpenseTracker`].
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Expense record, ids, money and calendar months
//! - `store`: In-memory ordered expense storage
//! - `services`: Validation and CRUD business logic
//! - `tracker`: The engine tying store, settings and viewed month together
//! - `audit`: Optional append-only audit log
//! - `display`: Plain-text rendering
//! - `cli`: Interactive shell
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use expense_tracker::config::Settings;
//! use expense_tracker::services::ExpenseInput;
//! use expense_tracker::ExpenseTracker;
//!
//! let mut tracker = ExpenseTracker::new(Settings::default());
//! let due = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
//! let rent = tracker
//!     .create(&ExpenseInput::new("Rent", "1500,00", due).repeat(true))
//!     .unwrap();
//!
//! assert_eq!(tracker.list_for_month(2024, 3).count(), 1);
//! assert_eq!(tracker.format_currency(rent.amount), "R$ 1.500,00");
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod tracker;

pub use error::{ExpenseError, ExpenseResult, FieldError, ValidationErrors};
pub use tracker::{ExpenseTracker, MonthSummary};
