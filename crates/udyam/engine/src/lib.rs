//! Wizard state machine for the Udyam registration form.
//!
//! The engine owns the [`WizardState`] of one registration session and
//! mediates between a renderer (any front end) and the registration
//! service. It never performs network IO itself; the two remote
//! collaborators are injected behind traits:
//!
//! - [`StepSubmitter`] — persists one step of accumulated form values.
//! - [`PincodeDirectory`] — resolves a 6-digit PIN code to candidate
//!   locations for auto-filling the address fields.
//!
//! # Protocol
//!
//! Edits are synchronous: [`Wizard::edit_field`] stores the value and
//! revalidates it immediately. The two suspending operations are split
//! into begin/apply pairs so the state stays editable while a request is
//! in flight:
//!
//! ```rust
//! # use udyam_engine::*;
//! # use udyam_types::{FormSchema, FieldValue};
//! # use std::sync::Arc;
//! let mut wizard = Wizard::new(Arc::new(FormSchema::builtin()));
//! wizard.edit_field("aadhaarNumber", FieldValue::from("123456789012"));
//! match wizard.begin_submit() {
//!     Ok(_submission) => {
//!         // … await submitter.submit_step(&submission), then:
//!         // wizard.apply_submit(outcome);
//!     }
//!     Err(_hold) => { /* field errors recorded, or submit in flight */ }
//! }
//! ```
//!
//! [`Wizard::submit`] wraps the pair for drivers that do not interleave.

#![deny(unsafe_code)]

pub mod lookup;
pub mod submit;
pub mod wizard;

pub use lookup::{LookupError, LookupTicket, PincodeDirectory, PincodeLocation, PincodeLookup};
pub use submit::{StepSubmitter, SubmitError, SubmitOutcome};
pub use wizard::{SubmitHold, Wizard, WizardState, PINCODE_FIELD};
