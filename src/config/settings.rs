//! User settings for the expense tracker
//!
//! Manages display preferences (currency format, date format) and whether
//! operations are recorded in the audit log.

use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::models::CurrencyFormat;

/// User settings for the expense tracker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// How amounts are rendered and parsed
    #[serde(default)]
    pub currency: CurrencyFormat,

    /// Date display format (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Whether to append every change to the audit log
    #[serde(default)]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency: CurrencyFormat::default(),
            date_format: default_date_format(),
            audit_enabled: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    ///
    /// A missing file is not written here; `save` is only called by `init`.
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let path = paths.settings_file();

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ExpenseError::Io(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| ExpenseError::Config(format!("Invalid {}: {}", path.display(), e)))?;
        settings
            .currency
            .check()
            .map_err(|e| ExpenseError::Config(format!("Invalid {}: {}", path.display(), e)))?;

        Ok(settings)
    }

    /// Write settings as pretty JSON, creating the directory if needed
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let mut contents = serde_json::to_string_pretty(self)?;
        contents.push('\n');

        let path = paths.settings_file();
        std::fs::write(&path, contents)
            .map_err(|e| ExpenseError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }
}
