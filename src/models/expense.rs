//! Expense model
//!
//! A single tracked bill: a name, an amount, the date it falls due, whether
//! it repeats and whether it has been paid.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::ExpenseId;
use super::money::Money;
use super::month::Month;

/// Date formats accepted for due dates, tried in order
const DATE_INPUT_FORMATS: [&str; 2] = ["%d/%m/%Y", "%Y-%m-%d"];

/// A tracked expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Expense name (never empty, stored trimmed)
    pub name: String,

    /// Amount owed
    pub amount: Money,

    /// Date the expense falls due
    pub due_date: NaiveDate,

    /// Whether the expense recurs every month
    ///
    /// Only stored and displayed; no future instances are generated from it.
    #[serde(default)]
    pub repeat: bool,

    /// Whether the expense has been paid
    #[serde(default)]
    pub is_paid: bool,

    /// When the expense was created
    pub created_at: DateTime<Utc>,

    /// When the expense was last modified
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new unpaid expense
    pub fn new(name: impl Into<String>, amount: Money, due_date: NaiveDate, repeat: bool) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            name: name.into(),
            amount,
            due_date,
            repeat,
            is_paid: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the editable fields, leaving id and paid status untouched
    pub fn apply(&mut self, name: impl Into<String>, amount: Money, due_date: NaiveDate, repeat: bool) {
        self.name = name.into();
        self.amount = amount;
        self.due_date = due_date;
        self.repeat = repeat;
        self.touch();
    }

    /// Mark as paid; calling it again changes nothing
    pub fn mark_paid(&mut self) {
        if !self.is_paid {
            self.is_paid = true;
            self.touch();
        }
    }

    /// Move the due date
    pub fn set_due_date(&mut self, due_date: NaiveDate) {
        self.due_date = due_date;
        self.touch();
    }

    /// Check if the expense falls due in the given month
    pub fn is_due_in(&self, month: Month) -> bool {
        month.contains(self.due_date)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Parse a due date typed as "DD/MM/YYYY" or "YYYY-MM-DD"
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}
