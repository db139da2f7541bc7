//! Client for the public postal PIN code directory
//! (`https://api.postalpincode.in`).
//!
//! The directory answers `GET /pincode/{code}` with a one-element array:
//! a status flag and zero or more post offices. This crate maps that
//! shape onto the engine's [`PincodeDirectory`] seam.

#![deny(unsafe_code)]

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use udyam_engine::{LookupError, PincodeDirectory, PincodeLocation};

const DEFAULT_BASE_URL: &str = "https://api.postalpincode.in";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One envelope of the directory response array.
#[derive(Debug, Deserialize)]
struct DirectoryEnvelope {
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "PostOffice", default)]
    post_offices: Option<Vec<PostOffice>>,
}

#[derive(Debug, Deserialize)]
struct PostOffice {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "District")]
    district: String,
    #[serde(rename = "State")]
    state: String,
}

impl From<PostOffice> for PincodeLocation {
    fn from(office: PostOffice) -> Self {
        PincodeLocation {
            city: office.name,
            district: office.district,
            state: office.state,
        }
    }
}

/// HTTP client for the PIN code directory.
pub struct PincodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl PincodeClient {
    /// Client against the public directory.
    pub fn new() -> Result<Self, LookupError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against a different deployment (tests, mirrors).
    pub fn with_base_url(base_url: &str) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| LookupError::Transport(err.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch(&self, pincode: &str) -> Result<Vec<PincodeLocation>, LookupError> {
        let url = format!("{}/pincode/{}", self.base_url, pincode);
        let envelopes: Vec<DirectoryEnvelope> = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| LookupError::Transport(err.to_string()))?
            .json()
            .await
            .map_err(|err| LookupError::Transport(err.to_string()))?;

        let locations = parse_envelopes(envelopes);
        if locations.is_empty() {
            tracing::debug!(pincode, "directory knows no such PIN code");
            return Err(LookupError::NoMatch);
        }
        Ok(locations)
    }
}

fn parse_envelopes(envelopes: Vec<DirectoryEnvelope>) -> Vec<PincodeLocation> {
    envelopes
        .into_iter()
        .find(|envelope| envelope.status == "Success")
        .and_then(|envelope| envelope.post_offices)
        .map(|offices| offices.into_iter().map(PincodeLocation::from).collect())
        .unwrap_or_default()
}

#[async_trait]
impl PincodeDirectory for PincodeClient {
    async fn lookup(&self, pincode: &str) -> Result<Vec<PincodeLocation>, LookupError> {
        self.fetch(pincode).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Vec<PincodeLocation> {
        let envelopes: Vec<DirectoryEnvelope> = serde_json::from_str(json).unwrap();
        parse_envelopes(envelopes)
    }

    #[test]
    fn success_response_yields_locations() {
        let locations = parse(
            r#"[{
                "Message": "Number of pincode(s) found:1",
                "Status": "Success",
                "PostOffice": [
                    {"Name": "New Delhi GPO", "District": "Central Delhi", "State": "Delhi", "Country": "India"},
                    {"Name": "Parliament House", "District": "Central Delhi", "State": "Delhi", "Country": "India"}
                ]
            }]"#,
        );
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].city, "New Delhi GPO");
        assert_eq!(locations[1].district, "Central Delhi");
    }

    #[test]
    fn error_status_yields_nothing() {
        let locations = parse(
            r#"[{"Message": "No records found", "Status": "Error", "PostOffice": null}]"#,
        );
        assert!(locations.is_empty());
    }

    #[test]
    fn missing_offices_yield_nothing() {
        let locations = parse(r#"[{"Status": "Success"}]"#);
        assert!(locations.is_empty());
    }
}
