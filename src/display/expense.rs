//! Expense display formatting
//!
//! Renders the month view (navigator header, expense rows, total footer),
//! single-expense details and field-level validation messages.

use crate::error::ValidationErrors;
use crate::models::Expense;
use crate::tracker::{ExpenseTracker, MonthSummary};

const NAME_WIDTH: usize = 24;
const RULE_WIDTH: usize = 64;

/// Format a single expense as a list row
pub fn format_expense_row(tracker: &ExpenseTracker, expense: &Expense) -> String {
    let paid_icon = if expense.is_paid { "✓" } else { " " };
    let repeat_icon = if expense.repeat { " ↻" } else { "" };

    format!(
        "{} {} {} {} {:>14}{}",
        paid_icon,
        expense.id,
        tracker.format_date(expense.due_date),
        truncate(&expense.name, NAME_WIDTH),
        tracker.format_currency(expense.amount),
        repeat_icon
    )
}

/// Format the viewed month: navigator header, its expenses and the total
pub fn format_month_view(tracker: &ExpenseTracker) -> String {
    let mut output = String::new();

    output.push_str(&format!("‹  {}  ›\n", tracker.viewed_month().label()));
    output.push_str(&"-".repeat(RULE_WIDTH));
    output.push('\n');

    let mut listed = tracker.list_viewed().peekable();
    if listed.peek().is_none() {
        output.push_str("No expenses this month.\n");
    }
    for expense in listed {
        output.push_str(&format_expense_row(tracker, expense));
        output.push('\n');
    }

    output.push_str(&"-".repeat(RULE_WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "Total: {}\n",
        tracker.format_currency(tracker.total_outstanding())
    ));

    output
}

/// Format every detail of one expense
pub fn format_expense_details(tracker: &ExpenseTracker, expense: &Expense) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.id));
    output.push_str(&format!("Name:    {}\n", expense.name));
    output.push_str(&format!("Amount:  {}\n", tracker.format_currency(expense.amount)));
    output.push_str(&format!("Due:     {}\n", tracker.format_date(expense.due_date)));
    output.push_str(&format!(
        "Repeat:  {}\n",
        if expense.repeat { "Yes" } else { "No" }
    ));
    output.push_str(&format!(
        "Paid:    {}\n",
        if expense.is_paid { "Yes" } else { "No" }
    ));

    output
}

/// Format the totals of one month
pub fn format_month_summary(tracker: &ExpenseTracker, summary: &MonthSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", summary.month.label()));
    output.push_str(&format!("Expenses:    {}\n", summary.count));
    output.push_str(&format!("Total:       {}\n", tracker.format_currency(summary.total)));
    output.push_str(&format!("Paid:        {}\n", tracker.format_currency(summary.paid)));
    output.push_str(&format!(
        "Outstanding: {}\n",
        tracker.format_currency(summary.outstanding)
    ));

    output
}

/// One line per rejected field, as shown under the form inputs
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .iter()
        .map(|e| format!("  {}: {}\n", e.field(), e))
        .collect()
}

/// Pad or cut a string to exactly `width` characters
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        format!("{:width$}", s, width = width)
    } else {
        let kept: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::error::FieldError;
    use crate::models::Month;
    use crate::services::ExpenseInput;
    use chrono::NaiveDate;

    fn tracker() -> ExpenseTracker {
        ExpenseTracker::new(Settings::default()).with_month(Month::new(2024, 3).unwrap())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_expense_row() {
        let mut tracker = tracker();
        let rent = tracker
            .create(&ExpenseInput::new("Rent", "1500,00", date(2024, 3, 5)).repeat(true))
            .unwrap();
        let paid = tracker.mark_paid(rent.id).unwrap();

        let row = format_expense_row(&tracker, &paid);
        assert!(row.starts_with('✓'));
        assert!(row.contains(&rent.id.to_string()));
        assert!(row.contains("05/03/2024"));
        assert!(row.contains("R$ 1.500,00"));
        assert!(row.ends_with('↻'));
    }

    #[test]
    fn test_format_month_view() {
        let mut tracker = tracker();
        tracker
            .create(&ExpenseInput::new("Rent", "1500,00", date(2024, 3, 5)))
            .unwrap();
        tracker
            .create(&ExpenseInput::new("Insurance", "300,00", date(2024, 4, 2)))
            .unwrap();

        let view = format_month_view(&tracker);
        assert!(view.contains("março de 2024"));
        assert!(view.contains("Rent"));
        assert!(!view.contains("Insurance"));
        assert!(view.contains("Total: R$ 1.800,00"));
    }

    #[test]
    fn test_format_empty_month() {
        let view = format_month_view(&tracker());
        assert!(view.contains("No expenses this month."));
        assert!(view.contains("Total: R$ 0,00"));
    }

    #[test]
    fn test_format_expense_details() {
        let mut tracker = tracker();
        let gym = tracker
            .create(&ExpenseInput::new("Gym", "99,90", date(2024, 3, 20)))
            .unwrap();

        let details = format_expense_details(&tracker, &gym);
        assert!(details.contains("Name:    Gym"));
        assert!(details.contains("Amount:  R$ 99,90"));
        assert!(details.contains("Due:     20/03/2024"));
        assert!(details.contains("Paid:    No"));
    }

    #[test]
    fn test_format_month_summary() {
        let mut tracker = tracker();
        tracker
            .create(&ExpenseInput::new("Gym", "99,90", date(2024, 3, 20)))
            .unwrap();
        let summary = tracker.month_summary(Month::new(2024, 3).unwrap());

        let formatted = format_month_summary(&tracker, &summary);
        assert!(formatted.contains("Expenses:    1"));
        assert!(formatted.contains("Outstanding: R$ 99,90"));
    }

    #[test]
    fn test_format_validation_errors() {
        let mut errors = ValidationErrors::new();
        errors.push(FieldError::NameRequired);
        errors.push(FieldError::InvalidAmount);

        assert_eq!(
            format_validation_errors(&errors),
            "  name: Expense name is required\n  amount: Amount must be a valid number\n"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Água", 6), "Água  ");
        let result = truncate("Conta de luz e água do apartamento", 10);
        assert_eq!(result.chars().count(), 10);
        assert!(result.ends_with("..."));
    }
}
