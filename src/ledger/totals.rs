//! Per-category aggregation of ledger amounts.

use std::collections::HashMap;

use super::record::ExpenseRecord;

/// Summed amounts per category.
///
/// Categories keep the order in which they first appear in the ledger.
/// Grouping is exact-match and case-sensitive.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryTotals {
    entries: Vec<(String, f64)>,
}

impl CategoryTotals {
    /// Total for `category`, if any record uses it.
    #[must_use]
    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, total)| *total)
    }

    /// Iterate over `(category, total)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, total)| (name.as_str(), *total))
    }

    /// Number of distinct categories.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there is nothing to report.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The largest category total, or `None` when empty.
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.entries.iter().map(|(_, total)| *total).reduce(f64::max)
    }
}

impl<'a> FromIterator<&'a ExpenseRecord> for CategoryTotals {
    fn from_iter<I: IntoIterator<Item = &'a ExpenseRecord>>(iter: I) -> Self {
        let mut entries: Vec<(String, f64)> = Vec::new();
        let mut positions: HashMap<&'a str, usize> = HashMap::new();

        for record in iter {
            if let Some(&i) = positions.get(record.category.as_str()) {
                entries[i].1 += record.amount;
            } else {
                positions.insert(record.category.as_str(), entries.len());
                entries.push((record.category.clone(), record.amount));
            }
        }

        Self { entries }
    }
}
