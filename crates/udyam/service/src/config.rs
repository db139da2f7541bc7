//! Configuration for the registration service.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Service configuration, CLI- and env-overridable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Listen address.
    pub listen_addr: SocketAddr,

    /// Schema document to serve; the embedded default when unset.
    #[serde(default)]
    pub schema_path: Option<PathBuf>,

    /// Allow cross-origin browsers (the original form is a web client).
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: ([127, 0, 0, 1], 8080).into(),
            schema_path: None,
            enable_cors: true,
        }
    }
}
