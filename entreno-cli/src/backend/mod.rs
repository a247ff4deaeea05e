//! Client for the hosted backend provider.
//!
//! The provider exposes three REST surfaces under one base URL: auth
//! (`/auth/v1`), tables (`/rest/v1`) and object storage (`/storage/v1`).
//! Every request carries the project's anon key in the `apikey` header; data
//! requests additionally carry the signed-in user's access token.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::Config;

pub mod auth;
mod error;
pub mod storage;
pub mod table;

pub use auth::{AuthUser, Session, SignUpOutcome};
pub use error::{BackendError, NOT_FOUND_CODE};
pub use storage::StorageBucket;
pub use table::TableQuery;

/// Backend provider client, cheap to clone
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl BackendClient {
    /// Create a new backend client from configuration
    pub fn new(config: &Config) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.backend.url.trim_end_matches('/').to_string(),
            anon_key: config.backend.anon_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a query against a table on behalf of the token's user
    pub fn table(&self, name: &str, access_token: &str) -> TableQuery<'_> {
        TableQuery::new(self, name, access_token)
    }

    /// Access a storage bucket on behalf of the token's user
    pub fn storage(&self, bucket: &str, access_token: &str) -> StorageBucket<'_> {
        StorageBucket::new(self, bucket, access_token)
    }

    /// Build a request with provider headers. Without a user token the anon
    /// key doubles as the bearer.
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        access_token: Option<&str>,
    ) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let bearer = access_token.unwrap_or(&self.anon_key);

        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", bearer))
    }
}

/// Fail with a [`BackendError`] unless the response is a success
pub(crate) async fn check(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::debug!("Backend returned {}: {}", status, body);
    Err(BackendError::from_body(status, &body))
}

/// Check the status and decode the JSON body
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let response = check(response).await?;
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| BackendError::Decode(e.to_string()))
}
