//! Resolved options handed to each tool after config layering.

use std::path::PathBuf;

use crate::organizer::Category;

/// Default ledger file, relative to the working directory.
pub const DEFAULT_LEDGER_FILE: &str = "expenses.csv";

/// Default currency symbol.
pub const DEFAULT_CURRENCY: &str = "$";

/// Settings for the expense ledger commands.
#[derive(Clone, Debug)]
pub struct LedgerOptions {
    /// CSV file backing the ledger
    pub file: PathBuf,

    /// Currency symbol printed before amounts
    pub currency: String,
}

/// Settings for the file organizer.
#[derive(Clone, Debug)]
pub struct OrganizeOptions {
    /// Directory whose files are sorted
    pub dir: PathBuf,

    /// Only report what would be moved
    pub dry_run: bool,

    /// Category table, first match wins
    pub categories: Vec<Category>,
}
