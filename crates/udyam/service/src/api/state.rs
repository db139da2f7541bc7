//! Shared handler state.

use crate::store::RegistrationStore;
use std::sync::Arc;
use udyam_types::FormSchema;

/// State injected into every handler: the record store and the immutable
/// schema document loaded at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RegistrationStore>,
    pub schema: Arc<FormSchema>,
}

impl AppState {
    pub fn new(store: Arc<dyn RegistrationStore>, schema: Arc<FormSchema>) -> Self {
        Self { store, schema }
    }
}
