//! Udyam registration service.
//!
//! Stateless request handlers over a record store: step submissions are
//! validated against the fixed domain rules (Aadhaar, PAN, consent,
//! organisation type) and persisted as a [`udyam_types::RegistrationRecord`]
//! keyed by an opaque identifier. The REST surface mirrors the original
//! portal clone:
//!
//! - `POST /api/submit-step` — validate and persist one wizard step
//! - `GET /api/registrations/:id` — read a record
//! - `PUT /api/registrations/:id` — patch a record
//! - `DELETE /api/registrations/:id` — delete a record
//! - `GET /api/schema` — the form schema the wizard renders from
//!
//! Validation failures answer 400 with `{"error": msg}`, missing records
//! 404, everything unexpected 500 with a generic message.

#![deny(unsafe_code)]

pub mod api;
pub mod config;
pub mod error;
pub mod server;
pub mod steps;
pub mod store;

pub use config::ServiceConfig;
pub use error::{ApiError, ApiResult};
pub use server::Server;
pub use store::{InMemoryStore, RegistrationStore, StoreError};
