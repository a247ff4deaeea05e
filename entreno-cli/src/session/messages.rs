use reqwest::StatusCode;
use std::fmt;

use crate::backend::BackendError;

/// User-facing classification of auth failures, keyed on provider error
/// codes rather than message text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    InvalidCredentials,
    EmailNotConfirmed,
    RateLimited,
    Other(String),
}

impl AuthFailure {
    pub fn from_error(error: &BackendError) -> Self {
        match error.code() {
            Some("invalid_credentials") => return AuthFailure::InvalidCredentials,
            Some("email_not_confirmed") => return AuthFailure::EmailNotConfirmed,
            Some(
                "over_request_rate_limit"
                | "over_email_send_rate_limit"
                | "over_sms_send_rate_limit",
            ) => return AuthFailure::RateLimited,
            _ => {}
        }

        if error.status() == Some(StatusCode::TOO_MANY_REQUESTS) {
            return AuthFailure::RateLimited;
        }

        AuthFailure::Other(error.to_string())
    }

    pub fn message(&self) -> &str {
        match self {
            AuthFailure::InvalidCredentials => "Credenciales incorrectas. Verifica tu email y clave.",
            AuthFailure::EmailNotConfirmed => "Confirma tu email antes de acceder.",
            AuthFailure::RateLimited => "Demasiados intentos. Intenta más tarde.",
            AuthFailure::Other(msg) if msg.trim().is_empty() => "Error de autenticación.",
            AuthFailure::Other(msg) => msg,
        }
    }
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: StatusCode, body: &str) -> BackendError {
        BackendError::from_body(status, body)
    }

    #[test]
    fn test_invalid_credentials() {
        let error = api_error(
            StatusCode::BAD_REQUEST,
            r#"{"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#,
        );
        let failure = AuthFailure::from_error(&error);
        assert_eq!(failure, AuthFailure::InvalidCredentials);
        assert!(failure.to_string().starts_with("Credenciales incorrectas"));
    }

    #[test]
    fn test_email_not_confirmed() {
        let error = api_error(
            StatusCode::BAD_REQUEST,
            r#"{"error_code":"email_not_confirmed","msg":"Email not confirmed"}"#,
        );
        assert_eq!(
            AuthFailure::from_error(&error).message(),
            "Confirma tu email antes de acceder."
        );
    }

    #[test]
    fn test_legacy_grant_errors() {
        let unconfirmed = api_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":"invalid_grant","error_description":"Email not confirmed"}"#,
        );
        assert_eq!(
            AuthFailure::from_error(&unconfirmed),
            AuthFailure::EmailNotConfirmed
        );

        let wrong_password = api_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        );
        assert_eq!(
            AuthFailure::from_error(&wrong_password),
            AuthFailure::InvalidCredentials
        );
    }

    #[test]
    fn test_rate_limit_by_code_or_status() {
        let by_code = api_error(
            StatusCode::BAD_REQUEST,
            r#"{"error_code":"over_email_send_rate_limit","msg":"email rate limit exceeded"}"#,
        );
        assert_eq!(AuthFailure::from_error(&by_code), AuthFailure::RateLimited);

        let by_status = api_error(StatusCode::TOO_MANY_REQUESTS, "");
        assert_eq!(AuthFailure::from_error(&by_status), AuthFailure::RateLimited);
    }

    #[test]
    fn test_message_text_alone_does_not_classify() {
        let error = api_error(
            StatusCode::BAD_REQUEST,
            r#"{"msg":"Invalid login credentials"}"#,
        );
        assert_eq!(
            AuthFailure::from_error(&error),
            AuthFailure::Other("Invalid login credentials".into())
        );
        assert_eq!(
            AuthFailure::Other(String::new()).message(),
            "Error de autenticación."
        );
    }
}
