//! Integration tests for the REST surface: routes, status codes, and
//! wire envelopes.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use udyam_service::api::{create_router, AppState};
use udyam_service::InMemoryStore;
use udyam_types::FormSchema;

fn app() -> Router {
    let state = AppState::new(
        Arc::new(InMemoryStore::new()),
        Arc::new(FormSchema::builtin()),
    );
    create_router(state, true)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("request handled");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body read");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request built")
}

fn put_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request built")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request built")
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .expect("request built")
}

fn step_one_body() -> Value {
    json!({
        "step": 1,
        "data": {
            "aadhaarNumber": "123456789012",
            "entrepreneurName": "Asha Rao",
            "aadhaarConsent": true
        }
    })
}

#[tokio::test]
async fn health_answers_ok() {
    let app = app();
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn schema_endpoint_serves_the_loaded_document() {
    let app = app();
    let (status, body) = send(&app, get("/api/schema")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["steps"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["steps"][0]["fields"][0]["id"], "aadhaarNumber");
}

#[tokio::test]
async fn step_one_issues_an_identifier() {
    let app = app();
    let (status, body) = send(&app, post_json("/api/submit-step", step_one_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Aadhaar validation successful");
    assert!(body["registrationId"].is_string());
}

#[tokio::test]
async fn step_one_validation_failure_is_a_400_error_envelope() {
    let app = app();
    let bad = json!({
        "step": 1,
        "data": {
            "aadhaarNumber": "12345",
            "entrepreneurName": "Asha Rao",
            "aadhaarConsent": true
        }
    });
    let (status, body) = send(&app, post_json("/api/submit-step", bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please enter a valid 12-digit Aadhaar number");
}

#[tokio::test]
async fn invalid_step_number_is_rejected() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json("/api/submit-step", json!({"step": 7, "data": {}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid step");
}

#[tokio::test]
async fn two_step_flow_accumulates_the_record() {
    let app = app();
    let (_, body) = send(&app, post_json("/api/submit-step", step_one_body())).await;
    let id = body["registrationId"].as_str().expect("id issued").to_string();

    let step_two = json!({
        "step": 2,
        "data": {
            "panNumber": "ABCDE1234F",
            "organizationType": "1",
            "registrationId": id
        }
    });
    let (status, body) = send(&app, post_json("/api/submit-step", step_two)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "PAN validation successful");

    let (status, body) = send(&app, get(&format!("/api/registrations/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["registration"]["panNumber"], "ABCDE1234F");
    assert_eq!(body["registration"]["stepCompleted"], 2);
}

#[tokio::test]
async fn step_two_with_unknown_identifier_is_404() {
    let app = app();
    let step_two = json!({
        "step": 2,
        "data": {
            "panNumber": "ABCDE1234F",
            "organizationType": "1",
            "registrationId": "ghost"
        }
    });
    let (status, body) = send(&app, post_json("/api/submit-step", step_two)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Registration not found");
}

#[tokio::test]
async fn missing_record_reads_as_404() {
    let app = app();
    let (status, body) = send(&app, get("/api/registrations/ghost")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Registration not found");
}

#[tokio::test]
async fn patch_updates_and_delete_removes() {
    let app = app();
    let (_, body) = send(&app, post_json("/api/submit-step", step_one_body())).await;
    let id = body["registrationId"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        put_json(
            &format!("/api/registrations/{id}"),
            json!({"entrepreneurName": "Asha R. Rao"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["registration"]["entrepreneurName"], "Asha R. Rao");

    let (status, body) = send(&app, delete(&format!("/api/registrations/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = send(&app, get(&format!("/api/registrations/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, delete(&format!("/api/registrations/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
