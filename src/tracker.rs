//! The expense tracker engine
//!
//! `ExpenseTracker` owns the store, the user's settings and the currently
//! viewed month. It is the single entry point a presentation layer needs:
//! every call is synchronous and returns its result or error as a value.

use std::fmt::Write;

use chrono::NaiveDate;
use tracing::debug;

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{AmountInput, Expense, ExpenseId, Money, Month};
use crate::services::{ExpenseInput, ExpenseService};
use crate::store::Store;

const FALLBACK_DATE_FORMAT: &str = "%d/%m/%Y";

/// Totals for the expenses due in one month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSummary {
    pub month: Month,
    pub count: usize,
    pub total: Money,
    pub paid: Money,
    pub outstanding: Money,
}

/// In-memory expense tracker
#[derive(Debug)]
pub struct ExpenseTracker {
    store: Store,
    settings: Settings,
    viewed: Month,
}

impl ExpenseTracker {
    /// Create an empty tracker viewing the current month
    pub fn new(settings: Settings) -> Self {
        Self::with_store(Store::new(), settings)
    }

    /// Create a tracker around an existing (possibly audited) store
    pub fn with_store(store: Store, settings: Settings) -> Self {
        Self {
            store,
            settings,
            viewed: Month::current(),
        }
    }

    /// Start viewing a specific month instead of the current one
    pub fn with_month(mut self, month: Month) -> Self {
        self.viewed = month;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    fn service(&mut self) -> ExpenseService<'_> {
        ExpenseService::new(&mut self.store, &self.settings.currency)
    }

    // --- Records ---

    /// Validate and add a new expense
    pub fn create(&mut self, input: &ExpenseInput) -> ExpenseResult<Expense> {
        self.service().create(input)
    }

    /// Validate and replace the editable fields of an expense
    pub fn update(&mut self, id: ExpenseId, input: &ExpenseInput) -> ExpenseResult<Expense> {
        self.service().update(id, input)
    }

    /// Mark an expense as paid (idempotent)
    pub fn mark_paid(&mut self, id: ExpenseId) -> ExpenseResult<Expense> {
        self.service().mark_paid(id)
    }

    /// Move an expense's due date
    pub fn set_due_date(&mut self, id: ExpenseId, due_date: NaiveDate) -> ExpenseResult<Expense> {
        self.service().set_due_date(id, due_date)
    }

    /// Delete an expense
    pub fn remove(&mut self, id: ExpenseId) -> ExpenseResult<Expense> {
        self.service().delete(id)
    }

    /// Look up an expense by id
    pub fn get(&self, id: ExpenseId) -> ExpenseResult<&Expense> {
        self.store
            .expenses
            .get(id)
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))
    }

    /// Look up an expense by a user-typed reference such as `exp-1a2b3c4d`
    ///
    /// A reference matching more than one expense is a `Parse` error.
    pub fn find(&self, reference: &str) -> ExpenseResult<&Expense> {
        match self.store.expenses.matching(reference).as_slice() {
            [expense] => Ok(*expense),
            [] => Err(ExpenseError::expense_not_found(reference)),
            many => Err(ExpenseError::Parse(format!(
                "Ambiguous expense id '{}': {} expenses match",
                reference,
                many.len()
            ))),
        }
    }

    /// All expenses in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Expense> + Clone + '_ {
        self.store.expenses.iter()
    }

    pub fn len(&self) -> usize {
        self.store.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.expenses.is_empty()
    }

    // --- Queries ---

    /// Expenses due in the given month, in insertion order
    ///
    /// The iterator is lazy and can be cloned to walk the list again. A month
    /// number outside 1..=12 matches nothing.
    pub fn list_for_month(&self, year: i32, month: u32) -> impl Iterator<Item = &Expense> + Clone + '_ {
        let month = Month::new(year, month).ok();
        self.store
            .expenses
            .iter()
            .filter(move |e| month.is_some_and(|m| e.is_due_in(m)))
    }

    /// Expenses due in the viewed month
    pub fn list_viewed(&self) -> impl Iterator<Item = &Expense> + Clone + '_ {
        self.due_in(self.viewed)
    }

    fn due_in(&self, month: Month) -> impl Iterator<Item = &Expense> + Clone + '_ {
        self.store.expenses.iter().filter(move |e| e.is_due_in(month))
    }

    /// Sum of every expense amount, regardless of month or paid status
    pub fn total_outstanding(&self) -> Money {
        self.store.expenses.iter().map(|e| e.amount).sum()
    }

    /// Totals for the expenses due in a month
    pub fn month_summary(&self, month: Month) -> MonthSummary {
        let mut summary = MonthSummary {
            month,
            count: 0,
            total: Money::zero(),
            paid: Money::zero(),
            outstanding: Money::zero(),
        };
        for expense in self.due_in(month) {
            summary.count += 1;
            summary.total += expense.amount;
            if expense.is_paid {
                summary.paid += expense.amount;
            } else {
                summary.outstanding += expense.amount;
            }
        }
        summary
    }

    // --- Viewed month ---

    pub fn viewed_month(&self) -> Month {
        self.viewed
    }

    /// Step the viewed month back by one
    pub fn previous_month(&mut self) -> Month {
        self.go_to_month(self.viewed.prev())
    }

    /// Step the viewed month forward by one
    pub fn next_month(&mut self) -> Month {
        self.go_to_month(self.viewed.next())
    }

    /// Jump straight to a month
    pub fn go_to_month(&mut self, month: Month) -> Month {
        self.viewed = month;
        debug!(month = %month, "viewing month");
        month
    }

    // --- Amount text ---

    /// Render an amount with the configured currency format
    pub fn format_currency(&self, amount: Money) -> String {
        self.settings.currency.format_currency(amount)
    }

    /// Normalize amount-field text with the configured format and cap
    pub fn parse_amount_input(&self, raw: &str) -> AmountInput {
        self.settings.currency.parse_amount_input(raw)
    }

    /// Text placed in the amount field when an expense is opened for editing
    pub fn format_amount_input(&self, amount: Money) -> String {
        self.settings.currency.format_plain(amount)
    }

    /// Render a date with the configured date format
    ///
    /// Falls back to `DD/MM/YYYY` when the configured format is invalid.
    pub fn format_date(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.settings.date_format)).is_err() {
            return date.format(FALLBACK_DATE_FORMAT).to_string();
        }
        out
    }
}
