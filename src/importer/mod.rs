//! Bulk Importer subsystem
//!
//! Offline, one-shot translation of a spreadsheet export into emission
//! records. Not reachable from the HTTP surface.
//!
//! # Design Principles
//!
//! - Column labels resolved through the static field table
//! - Missing or empty cells stay absent
//! - All rows committed together, or none

mod bulk;
mod errors;
mod reader;

pub use bulk::{map_row, BulkImporter, ImportReport};
pub use errors::{ImportError, ImportResult};
pub use reader::{parse_delimited, parse_rows, read_rows, sniff_delimiter, DatasetFormat, Row};
