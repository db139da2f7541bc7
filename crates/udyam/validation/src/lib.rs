//! Validation for the Udyam registration suite.
//!
//! Two layers live here:
//!
//! - [`validate_field`] — the schema-driven field validator the wizard
//!   runs on every edit and before every step submission. Pure function
//!   of (field definition, candidate value).
//! - The fixed domain validators ([`validate_aadhaar`], [`validate_pan`],
//!   …) the registration service applies server-side regardless of what
//!   the schema says.

#![deny(unsafe_code)]

use regex::Regex;
use std::sync::OnceLock;
use udyam_types::{FieldValue, FormField};

// ── Schema-driven field validation ───────────────────────────────────

/// Validate a candidate value against a field definition.
///
/// Returns `None` when valid, otherwise the message to display. Checks
/// run in priority order: required, then pattern, then max length; the
/// field's own message for the failing rule wins over the generic
/// fallback.
pub fn validate_field(field: &FormField, value: Option<&FieldValue>) -> Option<String> {
    let present = value.is_some_and(|v| match v {
        FieldValue::Text(s) => !s.trim().is_empty(),
        other => other.has_content(),
    });

    if field.required && !present {
        return Some(
            custom_message(field, |m| m.required.as_deref())
                .unwrap_or_else(|| format!("{} is required", field.label)),
        );
    }

    if !present {
        return None;
    }
    let text = value.map(FieldValue::display_string).unwrap_or_default();

    if let Some(pattern) = &field.pattern {
        if !whole_match(pattern, &text) {
            return Some(
                custom_message(field, |m| m.pattern.as_deref())
                    .unwrap_or_else(|| "Invalid format".to_string()),
            );
        }
    }

    if let Some(max) = field.max_length {
        if text.chars().count() > max {
            return Some(
                custom_message(field, |m| m.max_length.as_deref())
                    .unwrap_or_else(|| format!("Maximum {max} characters allowed")),
            );
        }
    }

    None
}

fn custom_message<'a>(
    field: &'a FormField,
    pick: impl Fn(&'a udyam_types::ValidationMessages) -> Option<&'a str>,
) -> Option<String> {
    field
        .validation
        .as_ref()
        .and_then(pick)
        .map(|s| s.to_string())
}

/// Whether `text` is matched in full by `pattern`.
///
/// An unparseable pattern counts as a non-match: the schema is authored
/// offline and a bad pattern should surface as a visible validation
/// failure, not a panic.
fn whole_match(pattern: &str, text: &str) -> bool {
    match Regex::new(&format!("^(?:{pattern})$")) {
        Ok(re) => re.is_match(text),
        Err(err) => {
            tracing::debug!(pattern, %err, "schema pattern failed to compile");
            false
        }
    }
}

// ── Fixed domain validators ──────────────────────────────────────────

static AADHAAR_RE: OnceLock<Regex> = OnceLock::new();
static PAN_RE: OnceLock<Regex> = OnceLock::new();
static MOBILE_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn strip_whitespace(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Exactly 12 ASCII digits, ignoring embedded whitespace.
pub fn validate_aadhaar(aadhaar: &str) -> bool {
    let re = AADHAAR_RE.get_or_init(|| Regex::new(r"^[0-9]{12}$").expect("aadhaar pattern"));
    re.is_match(&strip_whitespace(aadhaar))
}

/// PAN format: 5 letters, 4 digits, 1 letter. Case- and
/// whitespace-insensitive.
pub fn validate_pan(pan: &str) -> bool {
    let re =
        PAN_RE.get_or_init(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("pan pattern"));
    re.is_match(&strip_whitespace(&pan.to_uppercase()))
}

/// Non-empty after trimming, at most 100 characters.
pub fn validate_entrepreneur_name(name: &str) -> bool {
    !name.trim().is_empty() && name.chars().count() <= 100
}

/// Exactly 10 ASCII digits, ignoring embedded whitespace.
pub fn validate_mobile(mobile: &str) -> bool {
    let re = MOBILE_RE.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("mobile pattern"));
    re.is_match(&strip_whitespace(mobile))
}

/// Plain mailbox shape: local part, `@`, dotted domain.
pub fn validate_email(email: &str) -> bool {
    let re = EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern")
    });
    re.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use udyam_types::{FieldType, FormField, ValidationMessages};

    fn text_field(id: &str) -> FormField {
        FormField {
            id: id.to_string(),
            name: id.to_string(),
            label: id.to_string(),
            field_type: FieldType::Text,
            placeholder: None,
            required: false,
            pattern: None,
            max_length: None,
            options: Vec::new(),
            validation: None,
        }
    }

    #[test]
    fn aadhaar_accepts_twelve_digits() {
        assert!(validate_aadhaar("123456789012"));
        assert!(validate_aadhaar("1234 5678 9012"));
    }

    #[test]
    fn aadhaar_rejects_bad_input() {
        assert!(!validate_aadhaar("12345"));
        assert!(!validate_aadhaar("abcd56789012"));
        assert!(!validate_aadhaar(""));
        assert!(!validate_aadhaar("1234567890123"));
    }

    #[test]
    fn pan_accepts_valid_format() {
        assert!(validate_pan("ABCDE1234F"));
        assert!(validate_pan("abcde1234f"));
        assert!(validate_pan(" ABCDE 1234 F "));
    }

    #[test]
    fn pan_rejects_bad_input() {
        assert!(!validate_pan("ABC123"));
        assert!(!validate_pan("12345ABCDE"));
        assert!(!validate_pan(""));
    }

    #[test]
    fn entrepreneur_name_bounds() {
        assert!(validate_entrepreneur_name("Asha Rao"));
        assert!(!validate_entrepreneur_name("   "));
        assert!(!validate_entrepreneur_name(&"x".repeat(101)));
        assert!(validate_entrepreneur_name(&"x".repeat(100)));
    }

    #[test]
    fn mobile_and_email() {
        assert!(validate_mobile("9876543210"));
        assert!(!validate_mobile("98765"));
        assert!(validate_email("asha@example.in"));
        assert!(!validate_email("asha@example"));
    }

    #[test]
    fn required_wins_over_pattern() {
        let mut field = text_field("aadhaarNumber");
        field.required = true;
        field.pattern = Some("[0-9]{12}".to_string());
        field.validation = Some(ValidationMessages {
            required: Some("it is required".to_string()),
            pattern: Some("it is malformed".to_string()),
            max_length: None,
        });

        let empty = FieldValue::from("");
        assert_eq!(
            validate_field(&field, Some(&empty)),
            Some("it is required".to_string())
        );
        assert_eq!(
            validate_field(&field, None),
            Some("it is required".to_string())
        );
    }

    #[test]
    fn pattern_must_match_whole_value() {
        let mut field = text_field("pincode");
        field.pattern = Some("[0-9]{6}".to_string());
        let long = FieldValue::from("1234567");
        assert_eq!(
            validate_field(&field, Some(&long)),
            Some("Invalid format".to_string())
        );
        let ok = FieldValue::from("110001");
        assert_eq!(validate_field(&field, Some(&ok)), None);
    }

    #[test]
    fn max_length_uses_custom_message() {
        let mut field = text_field("entrepreneurName");
        field.max_length = Some(5);
        field.validation = Some(ValidationMessages {
            required: None,
            pattern: None,
            max_length: Some("too long".to_string()),
        });
        let long = FieldValue::from("abcdef");
        assert_eq!(
            validate_field(&field, Some(&long)),
            Some("too long".to_string())
        );
    }

    #[test]
    fn optional_empty_value_is_valid() {
        let mut field = text_field("pincode");
        field.pattern = Some("[0-9]{6}".to_string());
        let empty = FieldValue::from("");
        assert_eq!(validate_field(&field, Some(&empty)), None);
        assert_eq!(validate_field(&field, None), None);
    }

    #[test]
    fn unticked_required_checkbox_fails_required() {
        let mut field = text_field("aadhaarConsent");
        field.field_type = FieldType::Checkbox;
        field.required = true;
        let unticked = FieldValue::from(false);
        assert_eq!(
            validate_field(&field, Some(&unticked)),
            Some("aadhaarConsent is required".to_string())
        );
        let ticked = FieldValue::from(true);
        assert_eq!(validate_field(&field, Some(&ticked)), None);
    }

    #[test]
    fn bad_schema_pattern_reports_pattern_failure() {
        let mut field = text_field("broken");
        field.pattern = Some("[unclosed".to_string());
        let value = FieldValue::from("anything");
        assert_eq!(
            validate_field(&field, Some(&value)),
            Some("Invalid format".to_string())
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn any_twelve_digit_string_is_valid_aadhaar(digits in "[0-9]{12}") {
                prop_assert!(validate_aadhaar(&digits));
            }

            #[test]
            fn aadhaar_with_a_letter_is_invalid(
                prefix in "[0-9]{0,11}",
                letter in "[a-zA-Z]",
                suffix in "[0-9]{0,11}",
            ) {
                let candidate = format!("{prefix}{letter}{suffix}");
                prop_assert!(!validate_aadhaar(&candidate));
            }

            #[test]
            fn pan_round_trips_case(pan in "[A-Za-z]{5}[0-9]{4}[A-Za-z]") {
                prop_assert!(validate_pan(&pan));
            }
        }
    }
}
