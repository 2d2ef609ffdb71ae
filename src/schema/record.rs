//! Emission records and partial field assignments

use serde::Serialize;
use serde_json::{Map, Value};

use super::errors::FieldError;
use super::fields::{field, EmissionFields};
use super::types::{FieldDef, FieldValue};

/// A stored emission-factor record.
///
/// Serializes flat: `id` followed by every field name, with `null` for
/// absent values. No field is ever omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionRecord {
    pub id: i64,
    #[serde(flatten)]
    pub fields: EmissionFields,
}

impl EmissionFields {
    /// Build a field set from a JSON object keyed by field name.
    ///
    /// Keys that are not field names are ignored. `null` leaves the field
    /// absent.
    pub fn from_object(object: &Map<String, Value>) -> Result<Self, FieldError> {
        let mut fields = EmissionFields::default();
        for (key, value) in object {
            if let Some(def) = field(key) {
                fields.set(def.name, def.kind.from_json(def.name, value)?)?;
            }
        }
        Ok(fields)
    }
}

/// Partial update: an ordered set of field assignments.
///
/// A field appearing with `None` is cleared; a field not appearing is left
/// untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    assignments: Vec<(&'static FieldDef, Option<FieldValue>)>,
}

impl FieldPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an assignment. A later assignment to the same field replaces the
    /// earlier one.
    pub fn set(&mut self, name: &str, value: Option<FieldValue>) -> Result<(), FieldError> {
        let def = field(name).ok_or_else(|| FieldError::UnknownField(name.to_string()))?;
        if let Some(v) = &value {
            if v.kind() != def.kind {
                return Err(FieldError::TypeMismatch {
                    field: name.to_string(),
                    expected: def.kind.type_name(),
                });
            }
        }

        match self.assignments.iter_mut().find(|(d, _)| d.name == def.name) {
            Some(slot) => slot.1 = value,
            None => self.assignments.push((def, value)),
        }
        Ok(())
    }

    /// Builder form of [`FieldPatch::set`]
    pub fn with(mut self, name: &str, value: Option<FieldValue>) -> Result<Self, FieldError> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Build a patch from a JSON object keyed by field name.
    ///
    /// Present keys are assigned, including explicit `null`s; unknown keys
    /// are ignored.
    pub fn from_object(object: &Map<String, Value>) -> Result<Self, FieldError> {
        let mut patch = FieldPatch::new();
        for (key, value) in object {
            if let Some(def) = field(key) {
                patch.set(def.name, def.kind.from_json(def.name, value)?)?;
            }
        }
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static FieldDef, Option<&FieldValue>)> + '_ {
        self.assignments.iter().map(|(def, value)| (*def, value.as_ref()))
    }

    /// Apply the assignments to an in-memory field set
    pub fn apply_to(&self, fields: &mut EmissionFields) -> Result<(), FieldError> {
        for (def, value) in &self.assignments {
            fields.set(def.name, value.clone())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FIELDS;
    use serde_json::json;

    #[test]
    fn test_record_serializes_every_field() {
        let record = EmissionRecord {
            id: 1,
            fields: EmissionFields {
                co2f: Some(12.5),
                source: Some("ADEME".to_string()),
                ..Default::default()
            },
        };

        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), FIELDS.len() + 1);
        assert_eq!(object["id"], json!(1));
        assert_eq!(object["co2f"], json!(12.5));
        assert_eq!(object["source"], json!("ADEME"));
        assert_eq!(object["n2o"], Value::Null);
    }

    #[test]
    fn test_from_object_ignores_unknown_keys() {
        let body = json!({"co2f": 1.5, "bogus": "x", "id": 99});
        let fields = EmissionFields::from_object(body.as_object().unwrap()).unwrap();
        assert_eq!(fields.co2f, Some(1.5));
        assert_eq!(
            fields,
            EmissionFields {
                co2f: Some(1.5),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_from_object_reports_type_mismatch() {
        let body = json!({"co2f": {"nested": true}});
        let err = EmissionFields::from_object(body.as_object().unwrap()).unwrap_err();
        assert!(err.to_string().contains("co2f"));
    }

    #[test]
    fn test_patch_distinguishes_null_from_absent() {
        let body = json!({"co2f": 99.9, "source": null});
        let patch = FieldPatch::from_object(body.as_object().unwrap()).unwrap();
        assert_eq!(patch.len(), 2);

        let mut fields = EmissionFields {
            co2f: Some(12.5),
            source: Some("ADEME".to_string()),
            unite_francais: Some("kgCO2e/kWh".to_string()),
            ..Default::default()
        };
        patch.apply_to(&mut fields).unwrap();

        assert_eq!(fields.co2f, Some(99.9));
        assert_eq!(fields.source, None);
        assert_eq!(fields.unite_francais.as_deref(), Some("kgCO2e/kWh"));
    }

    #[test]
    fn test_patch_last_assignment_wins() {
        let patch = FieldPatch::new()
            .with("n2o", Some(FieldValue::Float(1.0)))
            .unwrap()
            .with("n2o", Some(FieldValue::Float(2.0)))
            .unwrap();
        assert_eq!(patch.len(), 1);
        let (def, value) = patch.iter().next().unwrap();
        assert_eq!(def.name, "n2o");
        assert_eq!(value, Some(&FieldValue::Float(2.0)));
    }

    #[test]
    fn test_patch_rejects_wrong_kind() {
        let err = FieldPatch::new()
            .with("source", Some(FieldValue::Float(1.0)))
            .unwrap_err();
        assert!(matches!(err, FieldError::TypeMismatch { .. }));
    }
}
