//! Expense service
//!
//! Provides the business logic for expense management: form validation,
//! CRUD operations and paid/due-date changes, with an audit entry for every
//! change.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::audit::Operation;
use crate::error::{ExpenseError, ExpenseResult, FieldError, ValidationErrors};
use crate::models::{CurrencyFormat, Expense, ExpenseId, Money};
use crate::store::Store;

/// Raw form input for creating or editing an expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseInput {
    pub name: String,
    /// Amount as typed, e.g. "1.500,00"
    pub raw_amount: String,
    pub due_date: NaiveDate,
    pub repeat: bool,
}

impl ExpenseInput {
    /// Create input for a one-off expense
    pub fn new(name: impl Into<String>, raw_amount: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            raw_amount: raw_amount.into(),
            due_date,
            repeat: false,
        }
    }

    /// Set the repeat flag
    pub fn repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }
}

/// Input that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    pub name: String,
    pub amount: Money,
    pub due_date: NaiveDate,
    pub repeat: bool,
}

/// Validate form input, reporting every failing field at once
pub fn validate_input(format: &CurrencyFormat, input: &ExpenseInput) -> ExpenseResult<ValidatedInput> {
    let mut errors = ValidationErrors::new();

    let name = input.name.trim();
    if name.is_empty() {
        errors.push(FieldError::NameRequired);
    }

    let amount = match format.parse_amount(&input.raw_amount) {
        Some(amount) => amount,
        None => {
            errors.push(FieldError::InvalidAmount);
            Money::zero()
        }
    };

    if !errors.is_empty() {
        warn!(errors = %errors, "rejected expense input");
    }
    errors.into_result()?;

    Ok(ValidatedInput {
        name: name.to_string(),
        amount,
        due_date: input.due_date,
        repeat: input.repeat,
    })
}

/// Service for expense management
pub struct ExpenseService<'a> {
    store: &'a mut Store,
    format: &'a CurrencyFormat,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(store: &'a mut Store, format: &'a CurrencyFormat) -> Self {
        Self { store, format }
    }

    /// Create a new unpaid expense at the end of the list
    pub fn create(&mut self, input: &ExpenseInput) -> ExpenseResult<Expense> {
        let valid = validate_input(self.format, input)?;

        let expense = Expense::new(valid.name, valid.amount, valid.due_date, valid.repeat);
        self.store.expenses.insert(expense.clone());
        self.store.log_create(&expense);

        debug!(id = %expense.id, name = %expense.name, amount = expense.amount.cents(), "created expense");
        Ok(expense)
    }

    /// Replace name, amount, due date and repeat of an existing expense
    pub fn update(&mut self, id: ExpenseId, input: &ExpenseInput) -> ExpenseResult<Expense> {
        if self.store.expenses.get(id).is_none() {
            return Err(ExpenseError::expense_not_found(id.to_string()));
        }
        let valid = validate_input(self.format, input)?;

        let expense = self
            .store
            .expenses
            .get_mut(id)
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;
        let before = expense.clone();
        expense.apply(valid.name, valid.amount, valid.due_date, valid.repeat);
        let after = expense.clone();

        let diff = self.describe_changes(&before, &after);
        self.store.log_change(Operation::Update, &before, &after, diff);

        debug!(id = %id, "updated expense");
        Ok(after)
    }

    /// Mark an expense as paid; marking a paid expense again is a no-op
    pub fn mark_paid(&mut self, id: ExpenseId) -> ExpenseResult<Expense> {
        let expense = self
            .store
            .expenses
            .get_mut(id)
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;

        if expense.is_paid {
            return Ok(expense.clone());
        }

        let before = expense.clone();
        expense.mark_paid();
        let after = expense.clone();
        self.store.log_change(
            Operation::Pay,
            &before,
            &after,
            Some("paid: no -> yes".to_string()),
        );

        debug!(id = %id, "marked expense as paid");
        Ok(after)
    }

    /// Move the due date of an expense
    pub fn set_due_date(&mut self, id: ExpenseId, due_date: NaiveDate) -> ExpenseResult<Expense> {
        let expense = self
            .store
            .expenses
            .get_mut(id)
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;

        let before = expense.clone();
        expense.set_due_date(due_date);
        let after = expense.clone();
        self.store.log_change(
            Operation::Reschedule,
            &before,
            &after,
            Some(format!("due: {} -> {}", before.due_date, after.due_date)),
        );

        debug!(id = %id, due_date = %due_date, "moved expense due date");
        Ok(after)
    }

    /// Delete an expense, returning it
    pub fn delete(&mut self, id: ExpenseId) -> ExpenseResult<Expense> {
        let expense = self
            .store
            .expenses
            .remove(id)
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;
        self.store.log_delete(&expense);

        debug!(id = %id, "deleted expense");
        Ok(expense)
    }

    fn describe_changes(&self, before: &Expense, after: &Expense) -> Option<String> {
        let mut changes = Vec::new();
        if before.name != after.name {
            changes.push(format!("name: '{}' -> '{}'", before.name, after.name));
        }
        if before.amount != after.amount {
            changes.push(format!(
                "amount: {} -> {}",
                self.format.format_currency(before.amount),
                self.format.format_currency(after.amount)
            ));
        }
        if before.due_date != after.due_date {
            changes.push(format!("due: {} -> {}", before.due_date, after.due_date));
        }
        if before.repeat != after.repeat {
            changes.push(format!("repeat: {} -> {}", before.repeat, after.repeat));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join(", "))
        }
    }
}
