//! Bulk importer
//!
//! Maps spreadsheet rows onto emission records through the label column of
//! the field table, then inserts the whole dataset in one transaction.
//!
//! Every row is mapped before anything is written, so a bad cell aborts the
//! run with the store untouched.

use std::path::Path;

use serde::Serialize;

use crate::observability::ObservationScope;
use crate::schema::{EmissionFields, FieldError, FIELDS};
use crate::storage::RecordStore;

use super::errors::{ImportError, ImportResult};
use super::reader::{read_rows, Row};

/// Outcome of an import run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub rows_read: usize,
    pub inserted: usize,
    pub first_id: Option<i64>,
    pub last_id: Option<i64>,
}

/// Map one row onto a field set.
///
/// Each field takes the cell under its label. Missing columns and `null`
/// cells leave the field absent; columns without a field are ignored.
pub fn map_row(row: &Row) -> Result<EmissionFields, FieldError> {
    let mut fields = EmissionFields::default();
    for def in FIELDS {
        if let Some(cell) = row.get(def.label) {
            fields.set(def.name, def.kind.from_json(def.name, cell)?)?;
        }
    }
    Ok(fields)
}

/// Offline importer bound to a store
pub struct BulkImporter<'a> {
    store: &'a RecordStore,
}

impl<'a> BulkImporter<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Read a dataset file and import it
    pub fn import_file(&self, path: &Path) -> ImportResult<ImportReport> {
        let file = path.display().to_string();
        let scope = ObservationScope::with_fields("IMPORT", &[("file", file.as_str())]);

        match read_rows(path).and_then(|rows| self.insert_rows(&rows)) {
            Ok(report) => {
                complete(scope, &report);
                Ok(report)
            }
            Err(err) => {
                scope.fail(&err.to_string());
                Err(err)
            }
        }
    }

    /// Import rows that are already in memory
    pub fn run(&self, rows: &[Row]) -> ImportResult<ImportReport> {
        let scope = ObservationScope::new("IMPORT");

        match self.insert_rows(rows) {
            Ok(report) => {
                complete(scope, &report);
                Ok(report)
            }
            Err(err) => {
                scope.fail(&err.to_string());
                Err(err)
            }
        }
    }

    fn insert_rows(&self, rows: &[Row]) -> ImportResult<ImportReport> {
        let records = rows
            .iter()
            .enumerate()
            .map(|(i, row)| map_row(row).map_err(|source| ImportError::Row { row: i + 1, source }))
            .collect::<ImportResult<Vec<_>>>()?;

        let ids = self.store.insert_batch(&records)?;

        Ok(ImportReport {
            rows_read: rows.len(),
            inserted: ids.len(),
            first_id: ids.first().copied(),
            last_id: ids.last().copied(),
        })
    }
}

fn complete(scope: ObservationScope<'_>, report: &ImportReport) {
    let rows = report.rows_read.to_string();
    let inserted = report.inserted.to_string();
    scope.complete_with_fields(&[("rows", rows.as_str()), ("inserted", inserted.as_str())]);
}
