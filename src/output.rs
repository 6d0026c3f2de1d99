//! Structured JSON output for scripting and piping.
//!
//! When the `--json` flag is passed, these structures are serialized to stdout
//! as a single JSON object, replacing all human-readable output.

use std::collections::BTreeMap;

use humansize::{DECIMAL, format_size};
use serde::Serialize;

use crate::{
    ledger::{CategoryTotals, Ledger},
    organizer::OrganizeResult,
};

/// JSON document for `expense list`.
#[derive(Serialize, Debug)]
pub struct JsonLedger {
    /// Path of the ledger file.
    pub file: String,

    /// Records in ledger order.
    pub records: Vec<JsonRecord>,

    /// Per-category totals, in order of first appearance.
    pub totals: Vec<JsonCategoryTotal>,

    /// Sum of all amounts.
    pub grand_total: f64,
}

/// A single record with its position.
#[derive(Serialize, Debug)]
pub struct JsonRecord {
    /// 0-based position, usable with `expense delete`.
    pub index: usize,

    pub category: String,
    pub description: String,
    pub amount: f64,
}

/// One category and its summed amount.
#[derive(Serialize, Debug, PartialEq)]
pub struct JsonCategoryTotal {
    pub category: String,
    pub total: f64,
}

/// JSON document for `organize`.
#[derive(Serialize, Debug)]
pub struct JsonOrganizeResult {
    /// `"dry_run"` or `"organize"`.
    pub mode: String,

    pub moved: usize,
    pub bytes_moved: u64,
    pub bytes_moved_formatted: String,
    pub per_category: BTreeMap<String, usize>,
    pub failure_count: usize,
    pub errors: Vec<String>,
}

/// JSON document for `password`.
#[derive(Serialize, Debug)]
pub struct JsonPassword {
    pub length: usize,
    pub password: String,
}

impl JsonLedger {
    /// Build the listing document for a ledger.
    #[must_use]
    pub fn from_ledger(ledger: &Ledger) -> Self {
        Self {
            file: ledger.path().display().to_string(),
            records: ledger
                .records()
                .iter()
                .enumerate()
                .map(|(index, r)| JsonRecord {
                    index,
                    category: r.category.clone(),
                    description: r.description.clone(),
                    amount: r.amount,
                })
                .collect(),
            totals: JsonCategoryTotal::from_totals(&ledger.totals()),
            grand_total: ledger.grand_total(),
        }
    }
}

impl JsonCategoryTotal {
    /// Convert category totals, keeping their order.
    #[must_use]
    pub fn from_totals(totals: &CategoryTotals) -> Vec<Self> {
        totals
            .iter()
            .map(|(category, total)| Self {
                category: category.to_string(),
                total,
            })
            .collect()
    }
}

impl JsonOrganizeResult {
    /// Convert an `OrganizeResult` into its JSON form.
    #[must_use]
    pub fn from_result(result: &OrganizeResult) -> Self {
        Self {
            mode: if result.dry_run { "dry_run" } else { "organize" }.to_string(),
            moved: result.moved,
            bytes_moved: result.bytes_moved,
            bytes_moved_formatted: format_size(result.bytes_moved, DECIMAL),
            per_category: result.per_category.clone(),
            failure_count: result.errors.len(),
            errors: result.errors.clone(),
        }
    }
}
