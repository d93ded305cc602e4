//! Audit logging for the expense tracker
//!
//! Records every change to an expense, with snapshots of the record before
//! and after, in an append-only JSON-lines file. The log is a trail only; it
//! is never replayed into the store.

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
