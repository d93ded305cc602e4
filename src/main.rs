use std::io;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expense_tracker::audit::AuditLogger;
use expense_tracker::cli::run_shell;
use expense_tracker::config::{ExpensePaths, Settings};
use expense_tracker::models::Month;
use expense_tracker::store::Store;
use expense_tracker::ExpenseTracker;

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Track this month's bills from the terminal",
    long_about = "An interactive shell for adding, editing, paying and deleting \
                  monthly expenses. Expenses live in memory only and are gone \
                  when the shell exits."
)]
struct Cli {
    /// Month to open the shell on (YYYY-MM), defaults to the current month
    #[arg(short, long, env = "EXPENSES_MONTH")]
    month: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell (the default)
    Shell,

    /// Write a default configuration file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let store = if settings.audit_enabled {
                paths.ensure_directories()?;
                Store::with_audit(AuditLogger::new(paths.audit_log()))
            } else {
                Store::new()
            };

            let mut tracker = ExpenseTracker::with_store(store, settings);
            if let Some(month) = cli.month {
                tracker.go_to_month(Month::parse(&month)?);
            }

            let stdin = io::stdin();
            let mut stdout = io::stdout();
            run_shell(&mut tracker, stdin.lock(), &mut stdout)?;
        }
        Commands::Init => {
            settings.save(&paths)?;
            println!("Wrote configuration to {}", paths.settings_file().display());
        }
        Commands::Config => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Config file: {}", paths.settings_file().display());
            println!("Audit log:   {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency.symbol);
            println!(
                "  Separators:      decimal '{}', grouping '{}'",
                settings.currency.decimal_separator, settings.currency.grouping_separator
            );
            println!("  Input cap:       {}", settings.currency.format_currency(settings.currency.max_input));
            println!("  Date format:     {}", settings.date_format);
            println!("  Audit enabled:   {}", settings.audit_enabled);
        }
    }

    Ok(())
}
