//! Blocking HTTP client for the portal backend.
//!
//! Covers the two external collaborators of the table editor: the submodel
//! description source (`GET /submodels`, `GET /submodels/{id}`) and the
//! submission endpoint (`POST`, default path `/aspect`).

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::Serialize;
use tracing::{debug, info};

use aspect_model::{Row, SubmodelDescription, SubmodelSummary};
use aspect_validate::invalid_rows;

use crate::error::{Result, SubmitError};

/// Default submission path on the backend.
pub const DEFAULT_SUBMIT_PATH: &str = "/aspect";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Accepted outcome of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    /// Number of rows in the submitted payload.
    pub submitted: usize,
    /// HTTP status the backend answered with.
    pub status: u16,
}

/// Client for the portal backend.
pub struct PortalClient {
    client: Client,
    base_url: String,
}

impl PortalClient {
    /// Create a client against a backend base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(SubmitError::from)?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn submodels_url(&self) -> String {
        format!("{}/submodels", self.base_url)
    }

    fn submodel_url(&self, id: &str) -> String {
        format!("{}/submodels/{id}", self.base_url)
    }

    fn submit_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{path}", self.base_url)
    }

    fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().unwrap_or_else(|_| "unknown error".to_string());
        Err(SubmitError::UnexpectedStatus {
            status: status.as_u16(),
            message,
        })
    }

    /// List the submodels the backend offers.
    pub fn list_submodels(&self) -> Result<Vec<SubmodelSummary>> {
        debug!(url = %self.submodels_url(), "fetching submodel list");
        let response = self.client.get(self.submodels_url()).send()?;
        Ok(Self::check_status(response)?.json()?)
    }

    /// Fetch one submodel description by identifier.
    pub fn fetch_submodel(&self, id: &str) -> Result<SubmodelDescription> {
        debug!(url = %self.submodel_url(id), "fetching submodel description");
        let response = self.client.get(self.submodel_url(id)).send()?;
        Ok(Self::check_status(response)?.json()?)
    }

    /// Submit the table to the backend.
    ///
    /// The whole set is checked against the business rule first; any failure
    /// (or an empty set) blocks submission with a single aggregate
    /// `InvalidRows` error and no request is issued. An all-valid set goes
    /// out as exactly one POST carrying every row, synthetic ids included.
    /// The payload is a point-in-time snapshot serialized here.
    pub fn submit(&self, rows: &[Row], path: &str) -> Result<SubmissionReceipt> {
        let invalid = invalid_rows(rows);
        if rows.is_empty() || !invalid.is_empty() {
            return Err(SubmitError::InvalidRows { invalid });
        }

        let url = self.submit_url(path);
        debug!(url = %url, rows = rows.len(), "submitting table");
        let response = self.client.post(url).json(&rows).send()?;
        let response = Self::check_status(response)?;
        let receipt = SubmissionReceipt {
            submitted: rows.len(),
            status: response.status().as_u16(),
        };
        info!(rows = receipt.submitted, status = receipt.status, "submission accepted");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_joined_against_the_base() {
        let client = PortalClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.submodels_url(), "http://localhost:8080/submodels");
        assert_eq!(
            client.submodel_url("serial-part"),
            "http://localhost:8080/submodels/serial-part"
        );
        assert_eq!(
            client.submit_url(DEFAULT_SUBMIT_PATH),
            "http://localhost:8080/aspect"
        );
        assert_eq!(client.submit_url("batch"), "http://localhost:8080/batch");
    }

    #[test]
    fn empty_table_is_blocked_before_any_request() {
        // unroutable base: reaching the network would fail loudly
        let client = PortalClient::new("http://127.0.0.1:1").unwrap();
        let err = client.submit(&[], DEFAULT_SUBMIT_PATH).unwrap_err();
        assert!(matches!(err, SubmitError::InvalidRows { ref invalid } if invalid.is_empty()));
    }
}
