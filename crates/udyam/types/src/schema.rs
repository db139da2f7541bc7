//! The declarative form schema: ordered steps of fields and buttons.
//!
//! The schema is produced offline (originally scraped from the Udyam
//! portal) and shipped as a JSON document. It is loaded once at process
//! start and never mutated; consumers hold it behind an `Arc`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Schema loading and well-formedness errors.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read schema file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse schema document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("schema has no steps")]
    Empty,

    #[error("duplicate field id '{field}' in step '{step}'")]
    DuplicateField { step: String, field: String },
}

/// Closed set of field kinds the renderer knows how to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Select,
    Checkbox,
}

/// One option of a select field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub text: String,
}

/// Per-rule override messages for a field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMessages {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<String>,
}

/// A single form field definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Regular expression the whole string form must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationMessages>,
}

/// A submit/navigation button of a step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormButton {
    pub id: String,
    #[serde(rename = "type")]
    pub button_type: String,
    pub text: String,
    pub action: String,
}

/// One page of the wizard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormStep {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub fields: Vec<FormField>,
    #[serde(default)]
    pub buttons: Vec<FormButton>,
}

impl FormStep {
    /// Find a field definition by id.
    pub fn field(&self, field_id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == field_id)
    }
}

/// The whole form: an ordered sequence of steps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    pub steps: Vec<FormStep>,
}

/// Default schema document, checked in alongside the crate.
const BUILTIN_SCHEMA: &str = include_str!("../data/form-schema.json");

impl FormSchema {
    /// Parse a schema from a JSON string and check its invariants.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let schema: FormSchema = serde_json::from_str(json)?;
        schema.check()?;
        Ok(schema)
    }

    /// Load a schema document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// The schema document shipped with the suite.
    pub fn builtin() -> Self {
        // The embedded document is validated by tests; a parse failure
        // here means the crate itself is broken.
        Self::from_json(BUILTIN_SCHEMA).expect("embedded form schema is well-formed")
    }

    /// Number of steps.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Well-formedness: at least one step, field ids unique per step.
    fn check(&self) -> Result<(), SchemaError> {
        if self.steps.is_empty() {
            return Err(SchemaError::Empty);
        }
        for step in &self.steps {
            let mut seen = HashSet::new();
            for field in &step.fields {
                if !seen.insert(field.id.as_str()) {
                    return Err(SchemaError::DuplicateField {
                        step: step.id.clone(),
                        field: field.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_schema_loads() {
        let schema = FormSchema::builtin();
        assert_eq!(schema.step_count(), 2);
        assert!(schema.steps[0].field("aadhaarNumber").is_some());
        assert!(schema.steps[1].field("panNumber").is_some());
    }

    #[test]
    fn empty_schema_rejected() {
        let err = FormSchema::from_json(r#"{"steps":[]}"#).unwrap_err();
        assert!(matches!(err, SchemaError::Empty));
    }

    #[test]
    fn duplicate_field_id_rejected() {
        let doc = r#"{
            "steps": [{
                "id": "s1",
                "title": "Step",
                "fields": [
                    {"id": "a", "name": "a", "label": "A", "type": "text"},
                    {"id": "a", "name": "a2", "label": "A2", "type": "text"}
                ]
            }]
        }"#;
        let err = FormSchema::from_json(doc).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateField { .. }));
    }

    #[test]
    fn field_type_uses_lowercase_tags() {
        let field: FormField = serde_json::from_str(
            r#"{"id":"x","name":"x","label":"X","type":"checkbox","required":true}"#,
        )
        .unwrap();
        assert_eq!(field.field_type, FieldType::Checkbox);
        assert!(field.required);
    }
}
