//! Wire envelopes exchanged between the wizard and the service.

use crate::{FieldValue, RegistrationId, RegistrationRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key under which the step 1 identifier travels inside the data map for
/// later steps.
pub const REGISTRATION_ID_KEY: &str = "registrationId";

/// Body of `POST /api/submit-step`.
///
/// `step` is 1-based; `data` carries every value collected so far, plus
/// the registration identifier once one exists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepSubmission {
    pub step: u32,
    pub data: BTreeMap<String, FieldValue>,
}

impl StepSubmission {
    /// The registration identifier carried in the data map, if any.
    pub fn registration_id(&self) -> Option<RegistrationId> {
        match self.data.get(REGISTRATION_ID_KEY) {
            Some(FieldValue::Text(id)) if !id.is_empty() => Some(RegistrationId::new(id.clone())),
            _ => None,
        }
    }

    /// Borrow a text field from the data map.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(FieldValue::as_text)
    }
}

/// Success envelope of `POST /api/submit-step`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepAccepted {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_id: Option<RegistrationId>,
}

/// Failure envelope: `{"error": "..."}` with an HTTP error status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body of the record read/update endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegistrationBody {
    pub registration: RegistrationRecord,
}

/// Acknowledgement of a record deletion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAck {
    pub success: bool,
    pub message: String,
}
