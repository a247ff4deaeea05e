use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// PostgREST code returned when a single-object request matched no rows
pub const NOT_FOUND_CODE: &str = "PGRST116";

/// Errors returned by the backend provider (auth, tables, storage)
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("{message}")]
    Api {
        status: StatusCode,
        code: Option<String>,
        message: String,
    },

    #[error("Error de red: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Respuesta no válida del backend: {0}")]
    Decode(String),
}

/// Union of the error shapes used by the auth, REST and storage services
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

impl BackendError {
    /// Build an error from a non-success status and raw response body
    pub fn from_body(status: StatusCode, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

        let code = parsed
            .error_code
            .or_else(|| match parsed.code {
                Some(Value::String(code)) => Some(code),
                _ => None,
            })
            .or_else(|| {
                legacy_code(
                    parsed.error.as_deref(),
                    parsed.error_description.as_deref(),
                )
            });

        let message = parsed
            .msg
            .or(parsed.message)
            .or(parsed.error_description)
            .or(parsed.error)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Error {}", status.as_u16()));

        BackendError::Api {
            status,
            code,
            message,
        }
    }

    /// Provider error code, when the provider sent one
    pub fn code(&self) -> Option<&str> {
        match self {
            BackendError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            BackendError::Api { status, .. } => Some(*status),
            BackendError::Network(e) => e.status(),
            BackendError::Decode(_) => None,
        }
    }

    /// True when a single-row select found nothing
    pub fn is_not_found(&self) -> bool {
        self.code() == Some(NOT_FOUND_CODE)
    }
}

/// Older auth servers answer every failed password grant with
/// `invalid_grant` and put the reason in `error_description`
fn legacy_code(error: Option<&str>, description: Option<&str>) -> Option<String> {
    let error = error?;
    if error != "invalid_grant" {
        return Some(error.to_string());
    }

    let code = match description.map(str::to_ascii_lowercase).as_deref() {
        Some("email not confirmed") => "email_not_confirmed",
        _ => "invalid_credentials",
    };
    Some(code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgrest_error() {
        let error = BackendError::from_body(
            StatusCode::NOT_ACCEPTABLE,
            r#"{"code":"PGRST116","details":"The result contains 0 rows","hint":null,"message":"JSON object requested, multiple (or no) rows returned"}"#,
        );
        assert!(error.is_not_found());
        assert_eq!(
            error.to_string(),
            "JSON object requested, multiple (or no) rows returned"
        );
    }

    #[test]
    fn test_auth_error_uses_error_code() {
        let error = BackendError::from_body(
            StatusCode::BAD_REQUEST,
            r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#,
        );
        assert_eq!(error.code(), Some("invalid_credentials"));
        assert_eq!(error.to_string(), "Invalid login credentials");
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_legacy_oauth_error() {
        let error = BackendError::from_body(
            StatusCode::BAD_REQUEST,
            r#"{"error":"invalid_grant","error_description":"Email not confirmed"}"#,
        );
        assert_eq!(error.code(), Some("email_not_confirmed"));
        assert_eq!(error.to_string(), "Email not confirmed");

        let error = BackendError::from_body(
            StatusCode::BAD_REQUEST,
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        );
        assert_eq!(error.code(), Some("invalid_credentials"));
    }

    #[test]
    fn test_unparseable_body_falls_back_to_status() {
        let error = BackendError::from_body(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert_eq!(error.code(), None);
        assert_eq!(error.to_string(), "Error 502");
        assert_eq!(error.status(), Some(StatusCode::BAD_GATEWAY));
    }
}
