//! ecoact - greenhouse-gas emission-factor records
//!
//! A single table of emission-factor records, exposed through a REST API
//! and filled in bulk from spreadsheet exports.

pub mod cli;
pub mod http_server;
pub mod importer;
pub mod observability;
pub mod schema;
pub mod storage;
