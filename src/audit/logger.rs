//! Append-only JSON-lines audit log
//!
//! The file is opened per write, so nothing is held open between changes and
//! a partly written log never blocks the shell.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{ExpenseError, ExpenseResult};

use super::entry::AuditEntry;

/// Writes and reads the audit log file
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Append one entry and flush it
    pub fn log(&self, entry: &AuditEntry) -> ExpenseResult<()> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| io_error("open", &self.log_path, e))?;
        file.write_all(&line)
            .and_then(|_| file.flush())
            .map_err(|e| io_error("write", &self.log_path, e))
    }

    /// Every entry, oldest first; a missing file is an empty log
    pub fn read_all(&self) -> ExpenseResult<Vec<AuditEntry>> {
        let mut entries = Vec::new();
        self.scan(|entry| entries.push(entry))?;
        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> ExpenseResult<Vec<AuditEntry>> {
        let mut window = VecDeque::with_capacity(count);
        self.scan(|entry| {
            if count == 0 {
                return;
            }
            if window.len() == count {
                window.pop_front();
            }
            window.push_back(entry);
        })?;
        Ok(window.into())
    }

    fn scan(&self, mut visit: impl FnMut(AuditEntry)) -> ExpenseResult<()> {
        let file = match File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(io_error("open", &self.log_path, e)),
        };

        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| io_error("read", &self.log_path, e))?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(&line).map_err(|e| {
                ExpenseError::Json(format!("audit log line {}: {}", index + 1, e))
            })?;
            visit(entry);
        }

        Ok(())
    }
}

fn io_error(action: &str, path: &Path, err: std::io::Error) -> ExpenseError {
    ExpenseError::Io(format!("Failed to {} audit log {}: {}", action, path.display(), err))
}
