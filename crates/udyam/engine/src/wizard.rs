//! The wizard controller: owns the session state and drives it through
//! the schema's steps.

use crate::lookup::{LookupError, LookupTicket, PincodeLocation, PincodeLookup};
use crate::submit::{StepSubmitter, SubmitError, SubmitOutcome};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use udyam_types::wire::REGISTRATION_ID_KEY;
use udyam_types::{FieldValue, FormSchema, FormStep, RegistrationId, StepAccepted, StepSubmission};
use udyam_validation::validate_field;

/// Field id with the special digit-stripping and lookup behavior.
pub const PINCODE_FIELD: &str = "pincode";

/// Field ids auto-filled from a lookup candidate.
const CITY_FIELD: &str = "city";
const DISTRICT_FIELD: &str = "district";
const STATE_FIELD: &str = "state";

const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";
const PINCODE_INVALID_MESSAGE: &str = "Invalid PIN code";
const PINCODE_FETCH_FAILED_MESSAGE: &str = "Failed to fetch PIN code data";

/// Why a submission did not start.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SubmitHold {
    /// A submission is already in flight.
    #[error("a submission is already in flight")]
    InFlight,

    /// The wizard already reached the terminal state.
    #[error("the wizard is already completed")]
    Completed,

    /// Validation failed; the per-field errors are in the state.
    #[error("the current step has field errors")]
    FieldErrors,
}

/// Snapshot of one wizard session.
///
/// Owned exclusively by its [`Wizard`]; read access only from outside.
#[derive(Clone, Debug, Default, Serialize)]
pub struct WizardState {
    /// 0-based index of the step being filled in.
    pub step_index: usize,
    /// Current value per field id.
    pub values: BTreeMap<String, FieldValue>,
    /// Current error message per field id; absent means valid.
    pub field_errors: BTreeMap<String, String>,
    /// Non-field error from the last submission attempt.
    pub step_error: Option<String>,
    /// Identifier issued by the service after step 1.
    pub registration_id: Option<RegistrationId>,
    /// A submission is in flight.
    pub submitting: bool,
    /// Terminal state: every step accepted.
    pub completed: bool,
    /// Candidate locations awaiting a user choice.
    pub suggestions: Vec<PincodeLocation>,
    /// Generation counter for lookup staleness; bumped by every PIN code
    /// edit, never reset, so tickets from before a restart stay dead.
    #[serde(skip)]
    lookup_generation: u64,
}

/// Drives one registration session through the form schema.
pub struct Wizard {
    schema: Arc<FormSchema>,
    state: WizardState,
}

impl Wizard {
    /// The schema must contain at least one step, as every document
    /// accepted by [`FormSchema::from_json`] does.
    pub fn new(schema: Arc<FormSchema>) -> Self {
        Self {
            schema,
            state: WizardState::default(),
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// The step currently being filled in, clamped to the last step so
    /// an index past the end (e.g. after completion) stays in range.
    pub fn current_step(&self) -> &FormStep {
        let last = self.schema.step_count().saturating_sub(1);
        &self.schema.steps[self.state.step_index.min(last)]
    }

    pub fn is_completed(&self) -> bool {
        self.state.completed
    }

    /// Store a new value for one field and revalidate it immediately.
    ///
    /// Returns a [`PincodeLookup`] when the edit armed a directory
    /// lookup: the PIN code field just reached exactly 6 digits. The
    /// caller performs the lookup and hands the result back through
    /// [`Wizard::apply_lookup`].
    pub fn edit_field(&mut self, field_id: &str, value: FieldValue) -> Option<PincodeLookup> {
        let mut value = value;
        let mut lookup = None;

        if field_id == PINCODE_FIELD {
            let digits: String = value
                .display_string()
                .chars()
                .filter(|c| c.is_ascii_digit())
                .collect();
            // Any edit invalidates an in-flight lookup for the old code.
            self.state.lookup_generation += 1;
            if digits.len() == 6 {
                lookup = Some(PincodeLookup {
                    ticket: LookupTicket(self.state.lookup_generation),
                    pincode: digits.clone(),
                });
            } else {
                self.state.suggestions.clear();
            }
            value = FieldValue::Text(digits);
        }

        self.state.field_errors.remove(field_id);
        self.state.values.insert(field_id.to_string(), value.clone());

        if let Some(field) = self
            .schema
            .steps
            .get(self.state.step_index)
            .and_then(|step| step.field(field_id))
        {
            if let Some(message) = validate_field(field, Some(&value)) {
                self.state.field_errors.insert(field_id.to_string(), message);
            }
        }

        lookup
    }

    /// Apply the result of a directory lookup armed by [`Wizard::edit_field`].
    ///
    /// Responses carrying a ticket older than the latest PIN code edit
    /// are discarded, so a slow lookup for a superseded code can never
    /// overwrite fresher fills.
    pub fn apply_lookup(
        &mut self,
        ticket: LookupTicket,
        outcome: Result<Vec<PincodeLocation>, LookupError>,
    ) {
        if ticket != LookupTicket(self.state.lookup_generation) {
            tracing::debug!(?ticket, "discarding stale PIN code lookup response");
            return;
        }

        match outcome {
            Ok(locations) if locations.len() == 1 => {
                self.fill_location(&locations[0]);
                self.state.suggestions.clear();
            }
            Ok(locations) if !locations.is_empty() => {
                self.state.suggestions = locations;
            }
            Ok(_) | Err(LookupError::NoMatch) => {
                self.state.suggestions.clear();
                self.state
                    .field_errors
                    .insert(PINCODE_FIELD.to_string(), PINCODE_INVALID_MESSAGE.to_string());
            }
            Err(LookupError::Transport(err)) => {
                tracing::warn!(%err, "PIN code lookup failed");
                self.state.suggestions.clear();
                self.state.field_errors.insert(
                    PINCODE_FIELD.to_string(),
                    PINCODE_FETCH_FAILED_MESSAGE.to_string(),
                );
            }
        }
    }

    /// Fill the address fields from one of the pending suggestions.
    pub fn choose_suggestion(&mut self, index: usize) -> bool {
        let Some(location) = self.state.suggestions.get(index).cloned() else {
            return false;
        };
        self.fill_location(&location);
        self.state.suggestions.clear();
        true
    }

    fn fill_location(&mut self, location: &PincodeLocation) {
        self.state
            .values
            .insert(CITY_FIELD.to_string(), FieldValue::from(location.city.clone()));
        self.state.values.insert(
            DISTRICT_FIELD.to_string(),
            FieldValue::from(location.district.clone()),
        );
        self.state.values.insert(
            STATE_FIELD.to_string(),
            FieldValue::from(location.state.clone()),
        );
    }

    /// Validate the whole current step and, if clean, produce the
    /// submission payload and raise the `submitting` flag.
    ///
    /// On validation failure the full per-field error set replaces the
    /// error map and nothing is sent.
    pub fn begin_submit(&mut self) -> Result<StepSubmission, SubmitHold> {
        if self.state.completed {
            return Err(SubmitHold::Completed);
        }
        if self.state.submitting {
            return Err(SubmitHold::InFlight);
        }

        self.state.step_error = None;

        let step = &self.schema.steps[self.state.step_index];
        let mut errors = BTreeMap::new();
        for field in &step.fields {
            if let Some(message) = validate_field(field, self.state.values.get(&field.id)) {
                errors.insert(field.id.clone(), message);
            }
        }
        if !errors.is_empty() {
            self.state.field_errors = errors;
            return Err(SubmitHold::FieldErrors);
        }

        self.state.submitting = true;

        let mut data = self.state.values.clone();
        if let Some(id) = &self.state.registration_id {
            data.insert(
                REGISTRATION_ID_KEY.to_string(),
                FieldValue::from(id.to_string()),
            );
        }
        Ok(StepSubmission {
            step: (self.state.step_index + 1) as u32,
            data,
        })
    }

    /// Apply the outcome of a submission started by [`Wizard::begin_submit`].
    ///
    /// Always clears the `submitting` flag. Success advances (or
    /// completes on the last step); any failure records one step-level
    /// message and stays put. No automatic retry.
    pub fn apply_submit(
        &mut self,
        outcome: Result<StepAccepted, SubmitError>,
    ) -> SubmitOutcome {
        self.state.submitting = false;

        match outcome {
            Ok(accepted) => {
                if let Some(id) = accepted.registration_id {
                    self.state.registration_id = Some(id);
                }
                if self.state.step_index + 1 < self.schema.step_count() {
                    self.state.step_index += 1;
                    self.state.field_errors.clear();
                    self.state.step_error = None;
                    self.state.suggestions.clear();
                    tracing::debug!(step = self.state.step_index, "advanced to next step");
                    SubmitOutcome::Advanced
                } else {
                    self.state.completed = true;
                    tracing::debug!("wizard completed");
                    SubmitOutcome::Completed
                }
            }
            Err(SubmitError::Rejected(message)) => {
                self.state.step_error = Some(message);
                SubmitOutcome::Stayed
            }
            Err(SubmitError::Transport(err)) => {
                tracing::warn!(%err, "step submission transport failure");
                self.state.step_error = Some(NETWORK_ERROR_MESSAGE.to_string());
                SubmitOutcome::Stayed
            }
        }
    }

    /// Validate, submit, and apply in one call, for drivers that do not
    /// interleave edits with in-flight submissions.
    pub async fn submit(&mut self, submitter: &dyn StepSubmitter) -> SubmitOutcome {
        let submission = match self.begin_submit() {
            Ok(submission) => submission,
            Err(_) => return SubmitOutcome::Held,
        };
        let outcome = submitter.submit_step(&submission).await;
        self.apply_submit(outcome)
    }

    /// Reset to a fresh session. Permitted from any state, including the
    /// terminal one.
    pub fn restart(&mut self) {
        // Keep the generation counter monotone so tickets issued before
        // the restart can never match a post-restart lookup.
        let generation = self.state.lookup_generation + 1;
        self.state = WizardState {
            lookup_generation: generation,
            ..WizardState::default()
        };
    }
}
