//! Interactive expense shell
//!
//! Reads one command per line, parses it with clap and relays it to the
//! tracker. Errors are printed and the shell keeps going; only `quit` or end
//! of input stops it.

use std::io::{BufRead, Write};

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::display::{
    format_expense_details, format_expense_row, format_month_summary, format_month_view,
    format_validation_errors,
};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{parse_date, Month};
use crate::services::ExpenseInput;
use crate::tracker::ExpenseTracker;

const PROMPT: &str = "> ";

#[derive(Parser, Debug)]
#[command(no_binary_name = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

/// Commands understood by the shell
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Add a new expense
    Add {
        /// Expense name
        name: String,
        /// Amount, e.g. "1.500,00"
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Due date (DD/MM/YYYY or YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        due: Option<String>,
        /// Repeats every month
        #[arg(short, long)]
        repeat: bool,
    },
    /// Edit an expense, keeping any field not given
    Edit {
        /// Expense ID (e.g. exp-1a2b3c4d)
        expense: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New due date
        #[arg(short, long)]
        due: Option<String>,
        /// New repeat flag (true/false)
        #[arg(short, long)]
        repeat: Option<bool>,
    },
    /// Show an expense's details
    Show {
        /// Expense ID
        expense: String,
    },
    /// Mark an expense as paid
    Paid {
        /// Expense ID
        expense: String,
    },
    /// Change an expense's due date
    Due {
        /// Expense ID
        expense: String,
        /// New due date
        date: String,
    },
    /// Delete an expense
    #[command(alias = "delete")]
    Rm {
        /// Expense ID
        expense: String,
    },
    /// List the expenses of the viewed month
    #[command(alias = "ls")]
    List,
    /// View the previous month
    Prev,
    /// View the next month
    Next,
    /// Jump to a month (YYYY-MM)
    Month {
        /// Month to view
        month: String,
    },
    /// Show the total of all expenses
    Total,
    /// Show paid and outstanding totals for the viewed month
    Summary,
    /// Show the most recent audit log entries
    History {
        /// Number of entries
        #[arg(default_value_t = 10)]
        count: usize,
    },
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// What the loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Run the shell until `quit` or end of input
pub fn run_shell<R: BufRead, W: Write>(
    tracker: &mut ExpenseTracker,
    mut input: R,
    out: &mut W,
) -> ExpenseResult<()> {
    write!(out, "{}", format_month_view(tracker))?;

    let mut line = String::new();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let tokens = match split_args(&line) {
            Ok(tokens) if tokens.is_empty() => continue,
            Ok(tokens) => tokens,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        let command = match ShellLine::try_parse_from(&tokens) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                write!(out, "{}", e)?;
                continue;
            }
        };

        match execute(tracker, command, out) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => report_error(out, &e)?,
        }
    }

    Ok(())
}

fn execute<W: Write>(
    tracker: &mut ExpenseTracker,
    command: ShellCommand,
    out: &mut W,
) -> ExpenseResult<Flow> {
    match command {
        ShellCommand::Add {
            name,
            amount,
            due,
            repeat,
        } => {
            let due_date = match due {
                Some(due) => read_date(&due)?,
                None => Local::now().date_naive(),
            };
            let expense = tracker.create(&ExpenseInput::new(name, amount, due_date).repeat(repeat))?;
            writeln!(out, "Added: {}", format_expense_row(tracker, &expense))?;
        }

        ShellCommand::Edit {
            expense,
            name,
            amount,
            due,
            repeat,
        } => {
            let current = tracker.find(&expense)?.clone();

            if name.is_none() && amount.is_none() && due.is_none() && repeat.is_none() {
                writeln!(out, "No changes specified.")?;
                return Ok(Flow::Continue);
            }

            let due_date = match due {
                Some(due) => read_date(&due)?,
                None => current.due_date,
            };
            let input = ExpenseInput {
                name: name.unwrap_or(current.name),
                raw_amount: amount.unwrap_or_else(|| tracker.format_amount_input(current.amount)),
                due_date,
                repeat: repeat.unwrap_or(current.repeat),
            };

            let updated = tracker.update(current.id, &input)?;
            writeln!(out, "Updated: {}", format_expense_row(tracker, &updated))?;
        }

        ShellCommand::Show { expense } => {
            let found = tracker.find(&expense)?;
            write!(out, "{}", format_expense_details(tracker, found))?;
        }

        ShellCommand::Paid { expense } => {
            let id = tracker.find(&expense)?.id;
            let paid = tracker.mark_paid(id)?;
            writeln!(out, "Paid: {}", format_expense_row(tracker, &paid))?;
        }

        ShellCommand::Due { expense, date } => {
            let id = tracker.find(&expense)?.id;
            let moved = tracker.set_due_date(id, read_date(&date)?)?;
            writeln!(out, "Moved: {}", format_expense_row(tracker, &moved))?;
        }

        ShellCommand::Rm { expense } => {
            let id = tracker.find(&expense)?.id;
            let removed = tracker.remove(id)?;
            writeln!(out, "Deleted: {} ({})", removed.name, removed.id)?;
        }

        ShellCommand::List => {
            write!(out, "{}", format_month_view(tracker))?;
        }

        ShellCommand::Prev => {
            tracker.previous_month();
            write!(out, "{}", format_month_view(tracker))?;
        }

        ShellCommand::Next => {
            tracker.next_month();
            write!(out, "{}", format_month_view(tracker))?;
        }

        ShellCommand::Month { month } => {
            let month = Month::parse(&month).map_err(|e| ExpenseError::Parse(e.to_string()))?;
            tracker.go_to_month(month);
            write!(out, "{}", format_month_view(tracker))?;
        }

        ShellCommand::Total => {
            writeln!(
                out,
                "Total: {}",
                tracker.format_currency(tracker.total_outstanding())
            )?;
        }

        ShellCommand::Summary => {
            let summary = tracker.month_summary(tracker.viewed_month());
            write!(out, "{}", format_month_summary(tracker, &summary))?;
        }

        ShellCommand::History { count } => match tracker.store().audit_logger() {
            Some(logger) => {
                let entries = logger.read_recent(count)?;
                if entries.is_empty() {
                    writeln!(out, "Audit log is empty.")?;
                }
                for entry in entries {
                    writeln!(out, "{}", entry.format_human_readable())?;
                }
            }
            None => writeln!(out, "Audit log is disabled.")?,
        },

        ShellCommand::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

fn report_error<W: Write>(out: &mut W, error: &ExpenseError) -> ExpenseResult<()> {
    match error {
        ExpenseError::Validation(errors) => {
            writeln!(out, "Could not save expense:")?;
            write!(out, "{}", format_validation_errors(errors))?;
        }
        ExpenseError::NotFound { .. } => writeln!(out, "{}", error)?,
        _ => writeln!(out, "Error: {}", error)?,
    }
    Ok(())
}

fn read_date(s: &str) -> ExpenseResult<NaiveDate> {
    parse_date(s).ok_or_else(|| {
        ExpenseError::Parse(format!(
            "Invalid date '{}': use DD/MM/YYYY or YYYY-MM-DD",
            s
        ))
    })
}

/// Split a command line into words, honouring single and double quotes
pub fn split_args(line: &str) -> ExpenseResult<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_word = true;
            }
            None if ch.is_whitespace() => {
                if in_word {
                    args.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(ch);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(ExpenseError::Parse("Unterminated quote".into()));
    }
    if in_word {
        args.push(current);
    }

    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::{Expense, Money};
    use crate::store::Store;

    fn run(tracker: &mut ExpenseTracker, script: &str) -> String {
        let mut out = Vec::new();
        run_shell(tracker, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn tracker() -> ExpenseTracker {
        ExpenseTracker::new(Settings::default()).with_month(Month::new(2024, 3).unwrap())
    }

    #[test]
    fn test_split_args() {
        assert_eq!(
            split_args("add \"Conta de luz\" 120,50 --due 05/03/2024").unwrap(),
            ["add", "Conta de luz", "120,50", "--due", "05/03/2024"]
        );
        assert_eq!(split_args("  ").unwrap(), Vec::<String>::new());
        assert_eq!(split_args("add '' 1").unwrap(), ["add", "", "1"]);
        assert!(split_args("add \"oops").is_err());
    }

    #[test]
    fn test_parse_commands() {
        let line = ShellLine::try_parse_from(["add", "Rent", "1500,00", "-d", "2024-03-05", "-r"])
            .unwrap();
        assert_eq!(
            line.command,
            ShellCommand::Add {
                name: "Rent".into(),
                amount: "1500,00".into(),
                due: Some("2024-03-05".into()),
                repeat: true,
            }
        );

        let line = ShellLine::try_parse_from(["edit", "exp-1", "--repeat", "false"]).unwrap();
        assert!(matches!(
            line.command,
            ShellCommand::Edit {
                repeat: Some(false),
                ..
            }
        ));

        assert_eq!(
            ShellLine::try_parse_from(["ls"]).unwrap().command,
            ShellCommand::List
        );
        assert!(ShellLine::try_parse_from(["frobnicate"]).is_err());
    }

    #[test]
    fn test_add_then_list() {
        let mut tracker = tracker();
        let output = run(
            &mut tracker,
            "add Rent 1500,00 --due 05/03/2024 --repeat\nadd Insurance 300,00 --due 2024-04-02\nlist\n",
        );

        assert_eq!(tracker.len(), 2);
        assert!(output.contains("Added:"));
        assert!(output.contains("R$ 1.500,00"));
        assert!(output.contains("Total: R$ 1.800,00"));
    }

    #[test]
    fn test_validation_errors_are_printed() {
        let mut tracker = tracker();
        let output = run(&mut tracker, "add '' abc --due 05/03/2024\n");

        assert!(tracker.is_empty());
        assert!(output.contains("Could not save expense:"));
        assert!(output.contains("name: Expense name is required"));
        assert!(output.contains("amount: Amount must be a valid number"));
    }

    #[test]
    fn test_unknown_expense_is_reported() {
        let mut tracker = tracker();
        let output = run(&mut tracker, "paid exp-00000000\nrm exp-00000000\n");
        assert!(output.contains("Expense not found: exp-00000000"));
    }

    #[test]
    fn test_mark_paid_edit_move_and_delete() {
        let mut tracker = tracker();
        run(&mut tracker, "add Rent 1500,00 --due 05/03/2024\n");
        let id = tracker.iter().next().unwrap().id.to_string();

        let script = format!(
            "paid {id}\nedit {id} --name Aluguel\ndue {id} 10/04/2024\nshow {id}\n",
            id = id
        );
        let output = run(&mut tracker, &script);

        let expense = tracker.find(&id).unwrap();
        assert!(expense.is_paid);
        assert_eq!(expense.name, "Aluguel");
        assert_eq!(expense.amount.cents(), 150_000);
        assert_eq!(expense.due_date, NaiveDate::from_ymd_opt(2024, 4, 10).unwrap());
        assert!(output.contains("Paid:    Yes"));

        run(&mut tracker, &format!("rm {}\n", id));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_navigation_commands() {
        let mut tracker = tracker();
        let output = run(&mut tracker, "next\nprev\nprev\nmonth 2025-12\nmonth 2025-13\n");

        assert!(output.contains("abril de 2024"));
        assert!(output.contains("fevereiro de 2024"));
        assert!(output.contains("dezembro de 2025"));
        assert!(output.contains("Error: Parse error: Invalid month: 13"));
        assert_eq!(tracker.viewed_month(), Month::new(2025, 12).unwrap());
    }

    #[test]
    fn test_out_of_range_year_is_reported() {
        let mut tracker = tracker();
        let output = run(&mut tracker, "month 2147483647-12\nnext\n");

        assert!(output.contains("Error: Parse error: Year out of range: 2147483647"));
        assert_eq!(tracker.viewed_month(), Month::new(2024, 4).unwrap());
    }

    #[test]
    fn test_ambiguous_reference_is_reported() {
        let mut store = Store::new();
        for (suffix, name) in [("1", "Rent"), ("2", "Water")] {
            let due = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
            let mut expense = Expense::new(name, Money::from_cents(1000), due, false);
            expense.id = format!("550e8400-e29b-41d4-a716-44665544000{}", suffix)
                .parse()
                .unwrap();
            store.expenses.insert(expense);
        }
        let mut tracker = ExpenseTracker::with_store(store, Settings::default());

        let output = run(&mut tracker, "paid exp-550e8400\n");
        assert!(output.contains("Ambiguous expense id 'exp-550e8400': 2 expenses match"));
        assert!(!output.contains("Expense not found"));
        assert!(tracker.iter().all(|e| !e.is_paid));
    }

    #[test]
    fn test_quit_stops_reading() {
        let mut tracker = tracker();
        run(&mut tracker, "quit\nadd Rent 1500,00\n");
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_bad_date_is_reported() {
        let mut tracker = tracker();
        let output = run(&mut tracker, "add Rent 10,00 --due 31/02/2024\n");
        assert!(output.contains("Invalid date '31/02/2024'"));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_history_without_audit() {
        let mut tracker = tracker();
        let output = run(&mut tracker, "history\n");
        assert!(output.contains("Audit log is disabled."));
    }
}
