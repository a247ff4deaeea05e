use reqwest::Method;
use serde_json::json;

use super::{check, BackendClient, BackendError};

/// Handle on one storage bucket
pub struct StorageBucket<'a> {
    backend: &'a BackendClient,
    bucket: String,
    access_token: String,
}

impl<'a> StorageBucket<'a> {
    pub(crate) fn new(backend: &'a BackendClient, bucket: &str, access_token: &str) -> Self {
        Self {
            backend,
            bucket: bucket.to_string(),
            access_token: access_token.to_string(),
        }
    }

    /// Upload an object; fails if the path already exists
    pub async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BackendError> {
        tracing::debug!("Uploading {} bytes to {}/{}", bytes.len(), self.bucket, path);

        let response = self
            .backend
            .request(
                Method::POST,
                &format!("/storage/v1/object/{}/{}", self.bucket, path),
                Some(&self.access_token),
            )
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    /// Public URL of an object. Pure string building, no request.
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.backend.base_url(),
            self.bucket,
            path
        )
    }

    /// Remove objects by path
    pub async fn remove(&self, paths: &[String]) -> Result<(), BackendError> {
        tracing::debug!("Removing {:?} from {}", paths, self.bucket);

        let response = self
            .backend
            .request(
                Method::DELETE,
                &format!("/storage/v1/object/{}", self.bucket),
                Some(&self.access_token),
            )
            .json(&json!({ "prefixes": paths }))
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }
}
