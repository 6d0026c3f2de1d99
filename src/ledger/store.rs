//! The ledger store: an ordered list of expenses mirrored to a CSV file.
//!
//! Every mutation rewrites the whole file, so the file on disk always reflects
//! the in-memory sequence once a mutating call returns `Ok`.

use std::{
    fs,
    io::Read,
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, StringRecord, Writer};

use super::{
    error::LedgerError,
    record::{ExpenseRecord, parse_amount},
    totals::CategoryTotals,
};

/// Column names of the ledger file, in the order they are written.
pub const HEADER: [&str; 3] = ["category", "description", "amount"];

/// How rows with an unparseable amount are treated while loading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoadMode {
    /// Skip the row and keep going.
    Lenient,

    /// Fail on the first bad row.
    Strict,
}

/// The expense ledger.
///
/// Owns the record sequence and the path of the file that mirrors it. Records
/// are addressed by their 0-based position.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    records: Vec<ExpenseRecord>,
}

impl Ledger {
    /// Open the ledger stored at `path`.
    ///
    /// A missing file gives an empty ledger. Rows whose amount cell is missing
    /// or not a number are skipped without error, so a partially damaged file
    /// still opens. Use [`Ledger::open_strict`] to detect such rows instead.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Csv`] if the file exists but cannot be read or
    /// is not valid CSV (for example, invalid UTF-8).
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        Self::open_with(path.into(), LoadMode::Lenient)
    }

    /// Open the ledger, rejecting any row whose amount does not parse.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::MalformedRow`] for the first bad row, or
    /// [`LedgerError::Csv`] on read failures.
    pub fn open_strict(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        Self::open_with(path.into(), LoadMode::Strict)
    }

    fn open_with(path: PathBuf, mode: LoadMode) -> Result<Self, LedgerError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "ledger file missing, starting empty");
            return Ok(Self {
                path,
                records: Vec::new(),
            });
        }

        let file = fs::File::open(&path).map_err(|e| LedgerError::Csv {
            path: path.clone(),
            source: e.into(),
        })?;
        let records = read_records(file, &path, mode)?;

        tracing::debug!(path = %path.display(), count = records.len(), "ledger loaded");
        Ok(Self { path, records })
    }

    /// Path of the file backing this ledger.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The records, in insertion order.
    #[must_use]
    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rewrite the backing file from the in-memory records.
    ///
    /// The header row is always written, even for an empty ledger. Amounts are
    /// written with their shortest exact decimal representation.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Io`] if the parent directory cannot be created
    /// and [`LedgerError::Csv`] if the file cannot be written.
    pub fn save(&self) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| LedgerError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let csv_err = |source: csv::Error| LedgerError::Csv {
            path: self.path.clone(),
            source,
        };

        let mut writer = Writer::from_path(&self.path).map_err(csv_err)?;
        writer.write_record(HEADER).map_err(csv_err)?;
        for record in &self.records {
            let amount = record.amount.to_string();
            writer
                .write_record([
                    record.category.as_str(),
                    record.description.as_str(),
                    amount.as_str(),
                ])
                .map_err(csv_err)?;
        }
        writer.flush().map_err(|e| csv_err(e.into()))?;

        tracing::debug!(path = %self.path.display(), count = self.records.len(), "ledger saved");
        Ok(())
    }

    /// Append a user-entered expense and persist the ledger.
    ///
    /// `amount` is parsed as a decimal number; category and description are
    /// taken as-is, empty strings included. Returns the index of the new
    /// record.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidAmount`] when `amount` does not parse, in
    /// which case nothing is appended or written. Save failures are returned
    /// as-is and the record is rolled back.
    pub fn append(
        &mut self,
        category: &str,
        description: &str,
        amount: &str,
    ) -> Result<usize, LedgerError> {
        let amount =
            parse_amount(amount).ok_or_else(|| LedgerError::InvalidAmount(amount.to_string()))?;

        self.push(ExpenseRecord::new(category, description, amount))
    }

    /// Append an already-typed record and persist the ledger.
    ///
    /// # Errors
    ///
    /// Returns the save error, after removing the record again.
    pub fn push(&mut self, record: ExpenseRecord) -> Result<usize, LedgerError> {
        self.records.push(record);

        if let Err(e) = self.save() {
            self.records.pop();
            return Err(e);
        }

        Ok(self.records.len() - 1)
    }

    /// Remove the record at the selected position and persist the ledger.
    ///
    /// `None` means the caller had nothing selected.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NoSelection`] when `selection` is `None`
    /// - [`LedgerError::IndexOutOfRange`] when the index is past the end
    /// - the save error, after putting the record back
    pub fn delete_at(&mut self, selection: Option<usize>) -> Result<ExpenseRecord, LedgerError> {
        let index = selection.ok_or(LedgerError::NoSelection)?;
        if index >= self.records.len() {
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }

        let removed = self.records.remove(index);

        if let Err(e) = self.save() {
            self.records.insert(index, removed);
            return Err(e);
        }

        Ok(removed)
    }

    /// Sum of amounts per category, in order of first appearance.
    ///
    /// Grouping is exact: `"Food"` and `"food"` are separate categories.
    #[must_use]
    pub fn totals(&self) -> CategoryTotals {
        self.records.iter().collect()
    }

    /// Sum of every amount in the ledger.
    #[must_use]
    pub fn grand_total(&self) -> f64 {
        self.records.iter().map(|r| r.amount).sum()
    }
}

/// Parse ledger rows from a CSV stream.
///
/// Columns are located by header name, so their order in the file does not
/// matter. A missing `category` or `description` cell reads as empty.
fn read_records<R: Read>(
    reader: R,
    path: &Path,
    mode: LoadMode,
) -> Result<Vec<ExpenseRecord>, LedgerError> {
    let csv_err = |source: csv::Error| LedgerError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = csv_reader.headers().map_err(csv_err)?.clone();
    let column = |name: &str| headers.iter().position(|h| h == name);
    let (category_col, description_col, amount_col) =
        (column(HEADER[0]), column(HEADER[1]), column(HEADER[2]));

    let cell = |row: &StringRecord, col: Option<usize>| -> String {
        col.and_then(|c| row.get(c)).unwrap_or_default().to_string()
    };

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row.map_err(csv_err)?;
        let raw_amount = amount_col.and_then(|c| row.get(c));

        let Some(amount) = raw_amount.and_then(parse_amount) else {
            let line = row.position().map_or(0, csv::Position::line);
            if mode == LoadMode::Strict {
                return Err(LedgerError::MalformedRow {
                    path: path.to_path_buf(),
                    line,
                    value: raw_amount.unwrap_or_default().to_string(),
                });
            }
            tracing::debug!(line, "skipping ledger row with invalid amount");
            continue;
        };

        records.push(ExpenseRecord {
            category: cell(&row, category_col),
            description: cell(&row, description_col),
            amount,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ledger_in(dir: &TempDir) -> PathBuf {
        dir.path().join("expenses.csv")
    }

    fn sample_records() -> Vec<ExpenseRecord> {
        vec![
            ExpenseRecord::new("Food", "Groceries", 10.0),
            ExpenseRecord::new("Food", "Coffee", 5.5),
            ExpenseRecord::new("Transport", "Bus, monthly", 3.0),
        ]
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let ledger = Ledger::open(ledger_in(&dir)).unwrap();

        assert!(ledger.is_empty());
        assert!(!ledger.path().exists());
    }

    #[test]
    fn test_save_then_open_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = ledger_in(&dir);

        let ledger = Ledger {
            path: path.clone(),
            records: sample_records(),
        };
        ledger.save().unwrap();

        let reloaded = Ledger::open(&path).unwrap();
        assert_eq!(reloaded.records(), sample_records().as_slice());
    }

    #[test]
    fn test_save_writes_header_for_empty_ledger() {
        let dir = TempDir::new().unwrap();
        let path = ledger_in(&dir);

        Ledger::open(&path).unwrap().save().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "category,description,amount\n");
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("expenses.csv");

        let mut ledger = Ledger::open(&path).unwrap();
        ledger.append("Food", "Lunch", "8").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_append_persists_immediately() {
        let dir = TempDir::new().unwrap();
        let path = ledger_in(&dir);

        let mut ledger = Ledger::open(&path).unwrap();
        ledger.append("Food", "Lunch", "12.50").unwrap();
        let index = ledger.append("Fun", "", " 4 ").unwrap();
        assert_eq!(index, 1);

        let reloaded = Ledger::open(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(
            reloaded.records().last(),
            Some(&ExpenseRecord::new("Fun", "", 4.0))
        );
    }

    #[test]
    fn test_append_invalid_amount_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = ledger_in(&dir);

        let mut ledger = Ledger::open(&path).unwrap();
        let result = ledger.append("Food", "Lunch", "a lot");

        assert!(matches!(result, Err(LedgerError::InvalidAmount(ref s)) if s == "a lot"));
        assert!(ledger.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_append_accepts_empty_category() {
        let dir = TempDir::new().unwrap();
        let mut ledger = Ledger::open(ledger_in(&dir)).unwrap();

        ledger.append("", "", "1").unwrap();

        assert_eq!(ledger.records()[0].category, "");
    }

    #[test]
    fn test_delete_at_removes_indexed_record() {
        let dir = TempDir::new().unwrap();
        let path = ledger_in(&dir);
        let mut ledger = Ledger {
            path: path.clone(),
            records: sample_records(),
        };

        let removed = ledger.delete_at(Some(1)).unwrap();

        assert_eq!(removed, ExpenseRecord::new("Food", "Coffee", 5.5));
        assert_eq!(ledger.len(), 2);
        assert!(!ledger.records().contains(&removed));

        let reloaded = Ledger::open(&path).unwrap();
        assert_eq!(reloaded.records(), ledger.records());
    }

    #[test]
    fn test_delete_at_out_of_range() {
        let dir = TempDir::new().unwrap();
        let path = ledger_in(&dir);
        let mut ledger = Ledger {
            path: path.clone(),
            records: sample_records(),
        };

        let result = ledger.delete_at(Some(3));

        assert!(matches!(
            result,
            Err(LedgerError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert_eq!(ledger.len(), 3);
        assert!(!path.exists());
    }

    #[test]
    fn test_delete_at_without_selection() {
        let dir = TempDir::new().unwrap();
        let mut ledger = Ledger {
            path: ledger_in(&dir),
            records: sample_records(),
        };

        assert!(matches!(
            ledger.delete_at(None),
            Err(LedgerError::NoSelection)
        ));
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn test_totals_and_grand_total() {
        let dir = TempDir::new().unwrap();
        let ledger = Ledger {
            path: ledger_in(&dir),
            records: sample_records(),
        };

        let totals = ledger.totals();
        assert_eq!(totals.len(), 2);
        assert!((totals.get("Food").unwrap() - 15.5).abs() < f64::EPSILON);
        assert!((totals.get("Transport").unwrap() - 3.0).abs() < f64::EPSILON);
        assert!((ledger.grand_total() - 18.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_totals_are_case_sensitive() {
        let dir = TempDir::new().unwrap();
        let ledger = Ledger {
            path: ledger_in(&dir),
            records: vec![
                ExpenseRecord::new("Food", "", 1.0),
                ExpenseRecord::new("food", "", 2.0),
            ],
        };

        let totals = ledger.totals();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals.get("Food"), Some(1.0));
        assert_eq!(totals.get("food"), Some(2.0));
    }

    #[test]
    fn test_open_skips_malformed_amount() {
        let dir = TempDir::new().unwrap();
        let path = ledger_in(&dir);
        fs::write(
            &path,
            "category,description,amount\nFood,Lunch,12.5\nFood,Oops,twelve\nTransport,Bus,3\n",
        )
        .unwrap();

        let ledger = Ledger::open(&path).unwrap();

        assert_eq!(
            ledger.records(),
            &[
                ExpenseRecord::new("Food", "Lunch", 12.5),
                ExpenseRecord::new("Transport", "Bus", 3.0),
            ]
        );
    }

    #[test]
    fn test_open_skips_short_rows() {
        let dir = TempDir::new().unwrap();
        let path = ledger_in(&dir);
        fs::write(&path, "category,description,amount\nFood,Lunch\nFood,Dinner,9\n").unwrap();

        let ledger = Ledger::open(&path).unwrap();

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.records()[0].description, "Dinner");
    }

    #[test]
    fn test_open_locates_columns_by_header() {
        let dir = TempDir::new().unwrap();
        let path = ledger_in(&dir);
        fs::write(&path, "amount,category,description\n2.5,Fun,Cinema\n").unwrap();

        let ledger = Ledger::open(&path).unwrap();

        assert_eq!(
            ledger.records(),
            &[ExpenseRecord::new("Fun", "Cinema", 2.5)]
        );
    }

    #[test]
    fn test_open_without_amount_column_loads_nothing() {
        let dir = TempDir::new().unwrap();
        let path = ledger_in(&dir);
        fs::write(&path, "category,description\nFood,Lunch\n").unwrap();

        assert!(Ledger::open(&path).unwrap().is_empty());
    }

    #[test]
    fn test_open_strict_reports_line() {
        let dir = TempDir::new().unwrap();
        let path = ledger_in(&dir);
        fs::write(
            &path,
            "category,description,amount\nFood,Lunch,12.5\nFood,Oops,twelve\n",
        )
        .unwrap();

        let result = Ledger::open_strict(&path);

        assert!(matches!(
            result,
            Err(LedgerError::MalformedRow { line: 3, ref value, .. }) if value == "twelve"
        ));
    }

    #[test]
    fn test_open_strict_accepts_clean_file() {
        let dir = TempDir::new().unwrap();
        let path = ledger_in(&dir);
        fs::write(&path, "category,description,amount\nFood,Lunch,12.5\n").unwrap();

        assert_eq!(Ledger::open_strict(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_quoted_fields_survive_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = ledger_in(&dir);

        let mut ledger = Ledger::open(&path).unwrap();
        ledger
            .append("Food, drinks", "He said \"cheers\"", "7.1")
            .unwrap();

        let reloaded = Ledger::open(&path).unwrap();
        assert_eq!(reloaded.records()[0].category, "Food, drinks");
        assert_eq!(reloaded.records()[0].description, "He said \"cheers\"");
    }
}
