//! Dataset reader
//!
//! Spreadsheet exports arrive in one of three shapes:
//! - `.csv`: delimited text with a header row of labels; `;`, tab or `,`
//!   is picked from the header line
//! - `.json`: an array of row objects
//! - `.jsonl` / `.ndjson`: one row object per line, blank lines skipped
//!
//! Row keys are column labels. Empty CSV cells become `null`.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use super::errors::{ImportError, ImportResult};

/// One input row: column label to cell value
pub type Row = Map<String, Value>;

/// Layout of a dataset file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// A single JSON array of row objects
    Json,
    /// One JSON row object per line
    JsonLines,
    /// Delimited text with a header row
    Csv,
}

impl DatasetFormat {
    /// Pick the format from a file extension; anything unrecognised is read
    /// as a JSON array.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("jsonl") | Some("ndjson") => DatasetFormat::JsonLines,
            Some("csv") | Some("tsv") => DatasetFormat::Csv,
            _ => DatasetFormat::Json,
        }
    }
}

/// Read every row of a dataset file
pub fn read_rows(path: &Path) -> ImportResult<Vec<Row>> {
    let content = fs::read_to_string(path)?;
    parse_rows(&content, DatasetFormat::from_path(path))
}

/// Parse rows from dataset text
pub fn parse_rows(content: &str, format: DatasetFormat) -> ImportResult<Vec<Row>> {
    let content = content.trim_start_matches('\u{feff}');
    match format {
        DatasetFormat::Json => parse_array(content),
        DatasetFormat::JsonLines => parse_lines(content),
        DatasetFormat::Csv => parse_delimited(content, sniff_delimiter(content)),
    }
}

/// Pick the delimiter that splits the header line most often. Ties go to
/// `;`, the separator of French spreadsheet exports.
pub fn sniff_delimiter(content: &str) -> u8 {
    let header = content.lines().next().unwrap_or_default();
    [b',', b'\t', b';']
        .into_iter()
        .map(|d| (d, header.bytes().filter(|b| *b == d).count()))
        .filter(|(_, count)| *count > 0)
        .max_by_key(|(_, count)| *count)
        .map(|(d, _)| d)
        .unwrap_or(b',')
}

/// Parse delimited text whose first record holds the column labels
pub fn parse_delimited(content: &str, delimiter: u8) -> ImportResult<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(content.as_bytes());

    let labels: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|label| label.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let row: Row = labels
            .iter()
            .zip(record.iter())
            .map(|(label, cell)| {
                let value = if cell.trim().is_empty() {
                    Value::Null
                } else {
                    Value::String(cell.to_string())
                };
                (label.clone(), value)
            })
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

fn csv_error(source: csv::Error) -> ImportError {
    let line = source.position().map(|p| p.line() as usize).unwrap_or(0);
    ImportError::Csv { line, source }
}

fn parse_array(content: &str) -> ImportResult<Vec<Row>> {
    let value: Value = serde_json::from_str(content).map_err(|e| ImportError::Parse {
        line: e.line(),
        source: e,
    })?;

    let items = match value {
        Value::Array(items) => items,
        _ => return Err(ImportError::NotTabular("expected an array of rows".to_string())),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| into_row(item, i + 1))
        .collect()
}

fn parse_lines(content: &str) -> ImportResult<Vec<Row>> {
    let mut rows = Vec::new();
    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line).map_err(|e| ImportError::Parse {
            line: i + 1,
            source: e,
        })?;
        rows.push(into_row(value, i + 1)?);
    }
    Ok(rows)
}

fn into_row(value: Value, position: usize) -> ImportResult<Row> {
    match value {
        Value::Object(row) => Ok(row),
        _ => Err(ImportError::NotTabular(format!(
            "row {} is not an object",
            position
        ))),
    }
}
