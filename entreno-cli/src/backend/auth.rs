use chrono::{DateTime, Duration, TimeZone, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use super::{check, decode, BackendClient, BackendError};

/// Authenticated user as returned by the auth service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Value,
}

impl AuthUser {
    /// Name to seed a new profile with: `full_name` metadata or the email's local part
    pub fn display_name(&self) -> String {
        if let Some(name) = self
            .user_metadata
            .get("full_name")
            .and_then(Value::as_str)
            .filter(|n| !n.trim().is_empty())
        {
            return name.to_string();
        }

        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .unwrap_or_default()
            .to_string()
    }
}

/// Token pair plus the user it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Unix seconds
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

impl Session {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        if let Some(ts) = self.expires_at {
            return Utc.timestamp_opt(ts, 0).single();
        }
        self.expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs))
    }
}

/// Result of a sign-up: a live session when the project auto-confirms
/// emails, or just the pending user when confirmation is required
#[derive(Debug, Clone)]
pub enum SignUpOutcome {
    Session(Session),
    PendingConfirmation(AuthUser),
    /// The provider answered without any user data
    NoUser,
}

impl BackendClient {
    /// Register a new account; `metadata` is stored as user metadata
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
    ) -> Result<SignUpOutcome, BackendError> {
        tracing::debug!("Signing up {}", email);

        let response = self
            .request(Method::POST, "/auth/v1/signup", None)
            .json(&json!({ "email": email, "password": password, "data": metadata }))
            .send()
            .await?;

        let body: Value = decode(response).await?;

        if body.get("access_token").is_some() {
            let session = serde_json::from_value(body)
                .map_err(|e| BackendError::Decode(e.to_string()))?;
            return Ok(SignUpOutcome::Session(session));
        }

        let user = body.get("user").cloned().unwrap_or(body);
        if user.get("id").is_some() {
            let user = serde_json::from_value(user)
                .map_err(|e| BackendError::Decode(e.to_string()))?;
            return Ok(SignUpOutcome::PendingConfirmation(user));
        }

        Ok(SignUpOutcome::NoUser)
    }

    /// Password grant
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, BackendError> {
        tracing::debug!("Signing in as {}", email);

        let response = self
            .request(Method::POST, "/auth/v1/token", None)
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        decode(response).await
    }

    /// Exchange a refresh token for a new session
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<Session, BackendError> {
        tracing::debug!("Refreshing session");

        let response = self
            .request(Method::POST, "/auth/v1/token", None)
            .query(&[("grant_type", "refresh_token")])
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await?;

        decode(response).await
    }

    /// Revoke the session server-side
    pub async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        let response = self
            .request(Method::POST, "/auth/v1/logout", Some(access_token))
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    /// Send a password recovery email that links back to `redirect_to`
    pub async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<(), BackendError> {
        let mut request = self.request(Method::POST, "/auth/v1/recover", None);
        if let Some(redirect) = redirect_to {
            request = request.query(&[("redirect_to", redirect)]);
        }

        let response = request.json(&json!({ "email": email })).send().await?;
        check(response).await?;
        Ok(())
    }

    /// Change the signed-in user's password
    pub async fn update_password(
        &self,
        access_token: &str,
        password: &str,
    ) -> Result<AuthUser, BackendError> {
        let response = self
            .request(Method::PUT, "/auth/v1/user", Some(access_token))
            .json(&json!({ "password": password }))
            .send()
            .await?;

        decode(response).await
    }

    /// Fetch the user an access token belongs to
    pub async fn get_user(&self, access_token: &str) -> Result<AuthUser, BackendError> {
        let response = self
            .request(Method::GET, "/auth/v1/user", Some(access_token))
            .send()
            .await?;

        decode(response).await
    }
}
