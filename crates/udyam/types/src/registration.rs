//! Registration records and identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier assigned to a registration when step 1 succeeds.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationId(pub String);

impl RegistrationId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The accumulated registration a service instance keeps per identifier.
///
/// Created when step 1 passes validation, updated by step 2. The wizard
/// never deletes records; deletion is an administrative operation on the
/// record endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub id: RegistrationId,
    pub aadhaar_number: String,
    pub entrepreneur_name: String,
    pub aadhaar_consent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pan_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_type: Option<String>,
    pub step_completed: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RegistrationRecord {
    /// Create the record step 1 produces.
    pub fn new(
        aadhaar_number: impl Into<String>,
        entrepreneur_name: impl Into<String>,
        aadhaar_consent: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: RegistrationId::generate(),
            aadhaar_number: aadhaar_number.into(),
            entrepreneur_name: entrepreneur_name.into(),
            aadhaar_consent,
            pan_number: None,
            organization_type: None,
            step_completed: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record the step 2 details and bump the progress counter.
    pub fn complete_pan_step(
        &mut self,
        pan_number: impl Into<String>,
        organization_type: impl Into<String>,
    ) {
        self.pan_number = Some(pan_number.into());
        self.organization_type = Some(organization_type.into());
        self.step_completed = self.step_completed.max(2);
        self.updated_at = Utc::now();
    }

    /// Apply an administrative patch, bumping `updated_at` when anything
    /// changed.
    pub fn apply_patch(&mut self, patch: &RegistrationPatch) -> bool {
        let mut changed = false;
        if let Some(name) = &patch.entrepreneur_name {
            self.entrepreneur_name = name.clone();
            changed = true;
        }
        if let Some(pan) = &patch.pan_number {
            self.pan_number = Some(pan.clone());
            changed = true;
        }
        if let Some(org) = &patch.organization_type {
            self.organization_type = Some(org.clone());
            changed = true;
        }
        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}

/// Partial update document for the record endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrepreneur_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pan_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_starts_at_step_one() {
        let record = RegistrationRecord::new("123456789012", "Asha Rao", true);
        assert_eq!(record.step_completed, 1);
        assert!(record.pan_number.is_none());
    }

    #[test]
    fn pan_step_bumps_progress() {
        let mut record = RegistrationRecord::new("123456789012", "Asha Rao", true);
        record.complete_pan_step("ABCDE1234F", "1");
        assert_eq!(record.step_completed, 2);
        assert_eq!(record.pan_number.as_deref(), Some("ABCDE1234F"));
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut record = RegistrationRecord::new("123456789012", "Asha Rao", true);
        let before = record.clone();
        assert!(!record.apply_patch(&RegistrationPatch::default()));
        assert_eq!(record, before);
    }

    #[test]
    fn record_serializes_camel_case() {
        let record = RegistrationRecord::new("123456789012", "Asha Rao", true);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("aadhaarNumber").is_some());
        assert!(json.get("stepCompleted").is_some());
        assert!(json.get("panNumber").is_none());
    }
}
