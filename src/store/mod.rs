//! In-memory store for the expense tracker
//!
//! The store owns every expense for the lifetime of the process and,
//! optionally, an audit logger that records each change. Nothing here is
//! loaded from or saved to disk.

pub mod expenses;

pub use expenses::ExpenseRepository;

use tracing::warn;

use crate::audit::{AuditEntry, AuditLogger, Operation};
use crate::models::Expense;

/// Owner of all expense records
#[derive(Debug, Default)]
pub struct Store {
    pub expenses: ExpenseRepository,
    audit: Option<AuditLogger>,
}

impl Store {
    /// Create an empty store without auditing
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that records changes to the given audit log
    pub fn with_audit(logger: AuditLogger) -> Self {
        Self {
            expenses: ExpenseRepository::new(),
            audit: Some(logger),
        }
    }

    pub fn audit_logger(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Record the creation of an expense
    pub fn log_create(&self, expense: &Expense) {
        self.record(|| AuditEntry::created(expense));
    }

    /// Record an in-place change to an expense
    pub fn log_change(
        &self,
        operation: Operation,
        before: &Expense,
        after: &Expense,
        changes: Option<String>,
    ) {
        self.record(|| AuditEntry::changed(operation, before, after, changes));
    }

    /// Record the removal of an expense
    pub fn log_delete(&self, expense: &Expense) {
        self.record(|| AuditEntry::deleted(expense));
    }

    // Audit failures never undo or fail the change itself.
    fn record(&self, entry: impl FnOnce() -> AuditEntry) {
        if let Some(logger) = &self.audit {
            let entry = entry();
            if let Err(e) = logger.log(&entry) {
                warn!(expense_id = %entry.expense_id, error = %e, "failed to write audit entry");
            }
        }
    }
}
