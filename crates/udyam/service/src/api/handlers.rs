//! Request handlers.

use crate::api::state::AppState;
use crate::error::{ApiError, ApiResult};
use crate::steps;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use udyam_types::{
    DeleteAck, FormSchema, RegistrationBody, RegistrationId, RegistrationPatch, StepAccepted,
    StepSubmission,
};

/// Health probe response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness probe.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Serve the form schema the wizard renders from.
pub async fn get_schema(State(state): State<AppState>) -> Json<FormSchema> {
    Json(state.schema.as_ref().clone())
}

/// Validate and persist one wizard step.
pub async fn submit_step(
    State(state): State<AppState>,
    Json(submission): Json<StepSubmission>,
) -> ApiResult<Json<StepAccepted>> {
    let accepted = steps::apply_step(state.store.as_ref(), &submission).await?;
    Ok(Json(accepted))
}

/// Read a registration record.
pub async fn get_registration(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<RegistrationBody>> {
    let registration = state
        .store
        .fetch(&RegistrationId::new(id))
        .await?
        .ok_or_else(|| ApiError::NotFound("Registration not found".to_string()))?;

    Ok(Json(RegistrationBody { registration }))
}

/// Patch a registration record.
pub async fn update_registration(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<RegistrationPatch>,
) -> ApiResult<Json<RegistrationBody>> {
    let id = RegistrationId::new(id);
    let mut registration = state
        .store
        .fetch(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Registration not found".to_string()))?;

    registration.apply_patch(&patch);
    if !state.store.update(registration.clone()).await? {
        // Deleted between fetch and update.
        return Err(ApiError::NotFound("Registration not found".to_string()));
    }

    tracing::info!(registration_id = %id, "registration updated");

    Ok(Json(RegistrationBody { registration }))
}

/// Delete a registration record.
pub async fn delete_registration(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteAck>> {
    let id = RegistrationId::new(id);
    if !state.store.remove(&id).await? {
        return Err(ApiError::NotFound("Registration not found".to_string()));
    }

    tracing::info!(registration_id = %id, "registration deleted");

    Ok(Json(DeleteAck {
        success: true,
        message: "Registration deleted".to_string(),
    }))
}
