//! Field kinds and values for emission-factor columns
//!
//! Every column is one of two kinds:
//! - text: UTF-8 string
//! - float: 64-bit floating point
//!
//! Absence is modelled with `Option` at the use site, never as a variant.

use serde_json::Value;

use super::errors::FieldError;

/// Column kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// UTF-8 string
    Text,
    /// 64-bit floating point
    Float,
}

impl FieldKind {
    /// Returns the kind name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Float => "float",
        }
    }

    /// SQL column type used when creating the table
    pub fn sql_type(&self) -> &'static str {
        match self {
            FieldKind::Text => "TEXT",
            FieldKind::Float => "REAL",
        }
    }

    /// Convert a JSON value into a value of this kind.
    ///
    /// `null` maps to `None`. Text columns accept numbers and booleans by
    /// rendering them; float columns accept numeric strings, with either a
    /// decimal point or a decimal comma. Blank strings in a float column are
    /// treated as absent.
    pub fn from_json(&self, field: &str, value: &Value) -> Result<Option<FieldValue>, FieldError> {
        let mismatch = || FieldError::TypeMismatch {
            field: field.to_string(),
            expected: self.type_name(),
        };

        match (self, value) {
            (_, Value::Null) => Ok(None),

            (FieldKind::Text, Value::String(s)) => Ok(Some(FieldValue::Text(s.clone()))),
            (FieldKind::Text, Value::Number(n)) => Ok(Some(FieldValue::Text(n.to_string()))),
            (FieldKind::Text, Value::Bool(b)) => Ok(Some(FieldValue::Text(b.to_string()))),

            (FieldKind::Float, Value::Number(n)) => {
                let f = n.as_f64().filter(|f| f.is_finite()).ok_or_else(mismatch)?;
                Ok(Some(FieldValue::Float(f)))
            }
            (FieldKind::Float, Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                let f: f64 = trimmed
                    .replace(',', ".")
                    .parse()
                    .map_err(|_| mismatch())?;
                if !f.is_finite() {
                    return Err(mismatch());
                }
                Ok(Some(FieldValue::Float(f)))
            }

            _ => Err(mismatch()),
        }
    }
}

/// A present column value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Float(f64),
}

impl FieldValue {
    /// Kind of this value
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Float(_) => FieldKind::Float,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
        }
    }
}

/// Rust types that can back a column.
///
/// Implemented for `String` and `f64` only; the field table macro uses it to
/// derive each column's kind from the declared struct type.
pub trait ColumnType: Sized {
    const KIND: FieldKind;

    fn into_value(self) -> FieldValue;

    fn from_value(value: FieldValue) -> Option<Self>;
}

impl ColumnType for String {
    const KIND: FieldKind = FieldKind::Text;

    fn into_value(self) -> FieldValue {
        FieldValue::Text(self)
    }

    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Text(s) => Some(s),
            FieldValue::Float(_) => None,
        }
    }
}

impl ColumnType for f64 {
    const KIND: FieldKind = FieldKind::Float;

    fn into_value(self) -> FieldValue {
        FieldValue::Float(self)
    }

    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Float(f) => Some(f),
            FieldValue::Text(_) => None,
        }
    }
}

/// One row of the static field table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Field and column name
    pub name: &'static str,
    /// Column kind
    pub kind: FieldKind,
    /// Spreadsheet column label used by the bulk importer
    pub label: &'static str,
}
