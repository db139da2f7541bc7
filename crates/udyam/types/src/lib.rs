//! Shared types for the Udyam registration suite.
//!
//! Three groups of types live here:
//!
//! - [`schema`] — the declarative form schema (steps, fields, buttons,
//!   validation messages). Loaded once at startup and treated as an
//!   immutable value from then on.
//! - [`registration`] — the registration record the service persists,
//!   its identifier, and the partial-update document.
//! - [`wire`] — the envelopes exchanged between wizard and service.
//!
//! The wire shapes (camelCase keys, `{success, message, registrationId?}`
//! success envelope, `{error}` failure envelope) follow the original
//! Udyam portal clone so existing clients keep working.

#![deny(unsafe_code)]

pub mod registration;
pub mod schema;
pub mod value;
pub mod wire;

pub use registration::{RegistrationId, RegistrationPatch, RegistrationRecord};
pub use schema::{
    FieldOption, FieldType, FormButton, FormField, FormSchema, FormStep, SchemaError,
    ValidationMessages,
};
pub use value::FieldValue;
pub use wire::{DeleteAck, ErrorBody, RegistrationBody, StepAccepted, StepSubmission};
