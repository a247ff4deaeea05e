use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::session::SessionError;

/// Errors from the application API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-2xx response. Displays the server's message, or `Error <status>`.
    #[error("{message}")]
    Http { status: StatusCode, message: String },

    #[error("Error de red: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Respuesta inesperada: {0}")]
    Decode(String),

    #[error("No has iniciado sesión")]
    NotAuthenticated,

    #[error(transparent)]
    Session(SessionError),
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ApiError {
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error.or(b.message))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Error {}", status.as_u16()));

        ApiError::Http { status, message }
    }
}

impl From<SessionError> for ApiError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::NotAuthenticated => ApiError::NotAuthenticated,
            other => ApiError::Session(other),
        }
    }
}
