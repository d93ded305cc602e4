//! Audit entry data structures
//!
//! An entry records one change to one expense, with typed snapshots of the
//! record before and after the change.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Expense, ExpenseId};

/// The kind of change an entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    /// Name, amount, due date or repeat edited through the form
    Update,
    Pay,
    Reschedule,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Pay => "PAY",
            Operation::Reschedule => "RESCHEDULE",
            Operation::Delete => "DELETE",
        };
        f.write_str(label)
    }
}

/// A single audit log line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub expense_id: ExpenseId,
    /// Name at the time of the change (the new name for renames)
    pub expense_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Expense>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Expense>,

    /// Human-readable list of changed fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<String>,
}

impl AuditEntry {
    fn new(operation: Operation, subject: &Expense) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            expense_id: subject.id,
            expense_name: subject.name.clone(),
            before: None,
            after: None,
            changes: None,
        }
    }

    pub fn created(expense: &Expense) -> Self {
        Self {
            after: Some(expense.clone()),
            ..Self::new(Operation::Create, expense)
        }
    }

    /// An entry for any in-place change (`Update`, `Pay` or `Reschedule`)
    pub fn changed(
        operation: Operation,
        before: &Expense,
        after: &Expense,
        changes: Option<String>,
    ) -> Self {
        Self {
            before: Some(before.clone()),
            after: Some(after.clone()),
            changes,
            ..Self::new(operation, after)
        }
    }

    pub fn deleted(expense: &Expense) -> Self {
        Self {
            before: Some(expense.clone()),
            ..Self::new(Operation::Delete, expense)
        }
    }

    /// Format the entry for the `history` listing
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} ({})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.expense_id,
            self.expense_name
        );

        if let Some(changes) = &self.changes {
            output.push_str("\n  Changes: ");
            output.push_str(changes);
        }

        output
    }
}
