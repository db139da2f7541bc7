//! Field values as entered into the wizard.

use serde::{Deserialize, Serialize};

/// A single form value: text input, numeric input, or checkbox state.
///
/// Serialized untagged so the wire shape is a plain JSON scalar, the way
/// the original form posted its data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// The string form used for pattern and length checks.
    pub fn display_string(&self) -> String {
        match self {
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s.clone(),
        }
    }

    /// Borrow the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Whether the value counts as "filled in".
    ///
    /// `false`, `0`, and the empty string are all treated as absent,
    /// matching how the original form distinguished an unticked checkbox
    /// or an untouched input from real content.
    pub fn has_content(&self) -> bool {
        match self {
            FieldValue::Bool(b) => *b,
            FieldValue::Number(n) => *n != 0.0,
            FieldValue::Text(s) => !s.is_empty(),
        }
    }

    /// Whether the value is an affirmative answer (consent checkboxes).
    pub fn is_affirmative(&self) -> bool {
        self.has_content()
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_round_trip() {
        let json = r#"{"a":"text","b":true,"c":12}"#;
        let map: std::collections::BTreeMap<String, FieldValue> =
            serde_json::from_str(json).unwrap();
        assert_eq!(map["a"], FieldValue::Text("text".into()));
        assert_eq!(map["b"], FieldValue::Bool(true));
        assert_eq!(map["c"], FieldValue::Number(12.0));
    }

    #[test]
    fn display_string_of_whole_number_has_no_fraction() {
        assert_eq!(FieldValue::Number(12.0).display_string(), "12");
    }

    #[test]
    fn content_detection() {
        assert!(FieldValue::Text("x".into()).has_content());
        assert!(!FieldValue::Text(String::new()).has_content());
        assert!(!FieldValue::Bool(false).has_content());
        assert!(!FieldValue::Number(0.0).has_content());
        assert!(FieldValue::Number(1.0).has_content());
    }
}
