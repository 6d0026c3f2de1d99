//! The expense record stored in the ledger.

use serde::{Deserialize, Serialize};

use crate::utils::format_amount;

/// One expense entry.
///
/// Records carry no identifier: their position in the [`Ledger`](super::Ledger)
/// is the only way to address them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Free-form category label. Grouping in totals is case-sensitive.
    pub category: String,

    /// Free-form description, may be empty.
    pub description: String,

    /// Amount spent. Expected non-negative but not validated.
    pub amount: f64,
}

impl ExpenseRecord {
    /// Create a new record from its three fields.
    #[must_use]
    pub fn new(category: impl Into<String>, description: impl Into<String>, amount: f64) -> Self {
        Self {
            category: category.into(),
            description: description.into(),
            amount,
        }
    }

    /// One-line listing, e.g. `Food — Lunch  •  $ 12.50`.
    #[must_use]
    pub fn summary(&self, currency: &str) -> String {
        format!(
            "{} — {}  •  {}",
            self.category,
            self.description,
            format_amount(currency, self.amount)
        )
    }
}


/// Parse a user-entered amount.
///
/// Surrounding whitespace is ignored. Returns `None` when the text is not a
/// decimal number.
#[must_use]
pub fn parse_amount(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}
