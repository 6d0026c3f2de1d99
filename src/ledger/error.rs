//! Errors raised by the ledger store.

use std::path::PathBuf;

/// Error type for fallible ledger operations.
///
/// Every variant is recoverable: the in-memory sequence and the file are left
/// exactly as they were before the failing call.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The amount typed by the user is not a decimal number.
    #[error("Invalid amount: {0:?} is not a number")]
    InvalidAmount(String),

    /// A delete was requested without any record being selected.
    #[error("No expense selected")]
    NoSelection,

    /// The selected position does not exist in the ledger.
    #[error("No expense at index {index} (ledger has {len} records)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Strict loading found a row whose amount does not parse.
    #[error("{}: line {line}: invalid amount {value:?}", path.display())]
    MalformedRow {
        path: PathBuf,
        line: u64,
        value: String,
    },

    /// Reading or writing the CSV file failed.
    #[error("Failed to process ledger file {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Creating the ledger's parent directory failed.
    #[error("Failed to prepare ledger directory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
