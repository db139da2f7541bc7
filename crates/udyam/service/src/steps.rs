//! Step submission rules.
//!
//! Each wizard step has a fixed server-side contract, enforced here
//! regardless of what the client-side schema validated. Error messages
//! match the original portal clone verbatim.

use crate::error::{ApiError, ApiResult};
use crate::store::RegistrationStore;
use udyam_types::{FieldValue, RegistrationRecord, StepAccepted, StepSubmission};
use udyam_validation::{validate_aadhaar, validate_entrepreneur_name, validate_pan};

/// Validate one step submission and persist its outcome.
pub async fn apply_step(
    store: &dyn RegistrationStore,
    submission: &StepSubmission,
) -> ApiResult<StepAccepted> {
    match submission.step {
        1 => apply_aadhaar_step(store, submission).await,
        2 => apply_pan_step(store, submission).await,
        _ => Err(ApiError::Validation("Invalid step".to_string())),
    }
}

/// Step 1: Aadhaar number, entrepreneur name, consent. Creates the
/// record and issues the identifier the remaining steps must carry.
async fn apply_aadhaar_step(
    store: &dyn RegistrationStore,
    submission: &StepSubmission,
) -> ApiResult<StepAccepted> {
    let aadhaar = submission.text("aadhaarNumber").unwrap_or_default();
    if !validate_aadhaar(aadhaar) {
        return Err(ApiError::Validation(
            "Please enter a valid 12-digit Aadhaar number".to_string(),
        ));
    }

    let name = submission.text("entrepreneurName").unwrap_or_default();
    if !validate_entrepreneur_name(name) {
        return Err(ApiError::Validation(
            "Entrepreneur name is required and must be less than 100 characters".to_string(),
        ));
    }

    let consent = submission
        .data
        .get("aadhaarConsent")
        .is_some_and(FieldValue::is_affirmative);
    if !consent {
        return Err(ApiError::Validation("You must consent to proceed".to_string()));
    }

    let record = RegistrationRecord::new(aadhaar, name, true);
    let id = record.id.clone();
    store.insert(record).await?;

    tracing::info!(registration_id = %id, "registration created");

    Ok(StepAccepted {
        success: true,
        message: "Aadhaar validation successful".to_string(),
        registration_id: Some(id),
    })
}

/// Step 2: PAN, organisation type, and the identifier from step 1.
/// Updates the existing record.
async fn apply_pan_step(
    store: &dyn RegistrationStore,
    submission: &StepSubmission,
) -> ApiResult<StepAccepted> {
    let pan = submission.text("panNumber").unwrap_or_default();
    if !validate_pan(pan) {
        return Err(ApiError::Validation(
            "Please enter a valid PAN number (Format: ABCDE1234F)".to_string(),
        ));
    }

    let organization_type = submission.text("organizationType").unwrap_or_default();
    if organization_type.is_empty() {
        return Err(ApiError::Validation(
            "Please select organization type".to_string(),
        ));
    }

    let Some(id) = submission.registration_id() else {
        return Err(ApiError::Validation(
            "Registration id from step 1 is required".to_string(),
        ));
    };

    let mut record = store
        .fetch(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Registration not found".to_string()))?;

    record.complete_pan_step(pan, organization_type);
    store.update(record).await?;

    tracing::info!(registration_id = %id, "PAN step recorded");

    Ok(StepAccepted {
        success: true,
        message: "PAN validation successful".to_string(),
        registration_id: None,
    })
}
