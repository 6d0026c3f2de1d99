//! Expense ledger backed by a CSV file.
//!
//! ## Main Parts
//!
//! - [`Ledger`] - The record sequence and its persisted mirror
//! - [`ExpenseRecord`] - One expense (category, description, amount)
//! - [`CategoryTotals`] - Per-category sums used for reporting
//! - [`chart`] - Terminal and SVG renderings of the totals

pub mod chart;
pub mod error;
pub mod record;
pub mod store;
pub mod totals;

pub use error::LedgerError;
pub use record::ExpenseRecord;
pub use store::Ledger;
pub use totals::CategoryTotals;
