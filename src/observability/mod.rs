//! Observability subsystem
//!
//! Structured JSON logging for the HTTP surface, the importer, and the CLI.
//!
//! # Usage
//!
//! ```ignore
//! use ecoact::observability::{Logger, ObservationScope};
//!
//! Logger::info("ELEMENT_CREATED", &[("id", "42")]);
//!
//! let scope = ObservationScope::new("IMPORT");
//! // ... do work ...
//! scope.complete();
//! ```

mod logger;
mod scope;

pub use logger::{Logger, Severity};
pub use scope::ObservationScope;
