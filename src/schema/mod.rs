//! Record schema for emission-factor data
//!
//! One entity, `EmissionRecord`: a store-assigned integer id plus 49
//! independently optional text or float attributes.
//!
//! # Design Principles
//!
//! - Field table declared once and checked at compile time
//! - No defaults other than absent
//! - No cross-field constraints

mod errors;
mod fields;
mod record;
mod types;

pub use errors::FieldError;
pub use fields::{field, EmissionFields, FIELDS};
pub use record::{EmissionRecord, FieldPatch};
pub use types::{ColumnType, FieldDef, FieldKind, FieldValue};
