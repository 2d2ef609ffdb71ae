//! Record Store subsystem
//!
//! Durable persistence of emission records in a single SQLite table.
//!
//! # Design Principles
//!
//! - One table, created on open if absent
//! - Identifiers assigned by the store, never reused
//! - Every single-record mutation commits before returning
//! - Batch inserts are all-or-nothing

mod errors;
mod store;

pub use errors::{StoreError, StoreResult};
pub use store::{RecordStore, TABLE_NAME};
