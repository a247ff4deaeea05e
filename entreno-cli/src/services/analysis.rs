use crate::api::{ApiClient, ApiError};
use crate::models::ProgressAnalysis;

const FALLBACK_ERROR: &str = "Error al conectar con el Coach IA";

/// Ask the coach to review recent sessions and suggest adjustments
pub async fn analyze(api: &ApiClient) -> Result<ProgressAnalysis, ApiError> {
    api.post("/api/ai/adjust", &serde_json::json!({})).await
}

/// Inline message for a failed analysis
pub fn error_message(error: &ApiError) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        FALLBACK_ERROR.to_string()
    } else {
        message
    }
}
