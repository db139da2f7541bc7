//! PIN code lookup seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One candidate location for a PIN code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PincodeLocation {
    pub city: String,
    pub district: String,
    pub state: String,
}

/// Lookup failures as the wizard distinguishes them.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    /// The directory answered but knows no such PIN code.
    #[error("no locations found for PIN code")]
    NoMatch,

    /// The directory could not be reached or answered garbage.
    #[error("PIN code lookup failed: {0}")]
    Transport(String),
}

/// Monotone ticket identifying one armed lookup.
///
/// Each edit that re-arms the lookup issues a fresh ticket; a response
/// applied with an older ticket is stale and gets discarded. This is the
/// ordering guard the original form lacked (its last-arriving response
/// won, even for an outdated PIN code).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct LookupTicket(pub(crate) u64);

/// A lookup request the wizard asks its driver to perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PincodeLookup {
    pub ticket: LookupTicket,
    pub pincode: String,
}

/// Resolves a 6-digit PIN code to candidate locations.
#[async_trait]
pub trait PincodeDirectory: Send + Sync {
    async fn lookup(&self, pincode: &str) -> Result<Vec<PincodeLocation>, LookupError>;
}
