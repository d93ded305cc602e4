//! CLI command handlers
//!
//! This module contains the interactive shell, bridging clap argument
//! parsing with the expense tracker.

pub mod shell;

pub use shell::{run_shell, split_args, ShellCommand};
