//! In-memory expense repository
//!
//! Holds expenses in insertion order. Lookups are linear scans, which is
//! plenty for a personal expense list.

use crate::models::{Expense, ExpenseId};

/// Ordered collection of expenses
#[derive(Debug, Default)]
pub struct ExpenseRepository {
    expenses: Vec<Expense>,
}

impl ExpenseRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an expense by ID
    pub fn get_mut(&mut self, id: ExpenseId) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|e| e.id == id)
    }

    /// Expenses whose id matches a user-typed reference (short id, full id or
    /// prefix), in insertion order
    pub fn matching(&self, reference: &str) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|e| e.id.matches(reference))
            .collect()
    }

    /// Append an expense at the end
    pub fn insert(&mut self, expense: Expense) {
        self.expenses.push(expense);
    }

    /// Remove an expense, keeping the order of the rest
    pub fn remove(&mut self, id: ExpenseId) -> Option<Expense> {
        let index = self.expenses.iter().position(|e| e.id == id)?;
        Some(self.expenses.remove(index))
    }

    /// All expenses in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Expense> {
        self.expenses.iter()
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}
