#![allow(dead_code)]

use chrono::{Duration, Utc};
use entreno_cli::config::{AuthConfig, Config};
use entreno_cli::context::AppContext;
use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::MockServer;

pub const ACCESS_TOKEN: &str = "test_access_token";
pub const ANON_KEY: &str = "test_anon_key";

/// Config pointing both the backend and the API at the mock server
pub fn config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.backend.url = server.uri();
    config.backend.anon_key = ANON_KEY.to_string();
    config.api.base_url = server.uri();
    config
}

/// Context with an unexpired session restored, no network involved
pub async fn signed_in_context(server: &MockServer) -> (AppContext, Uuid) {
    let user_id = Uuid::new_v4();
    let ctx = AppContext::new(config(server), None).unwrap();

    ctx.session
        .init(&AuthConfig {
            access_token: ACCESS_TOKEN.to_string(),
            refresh_token: "test_refresh_token".to_string(),
            expires_at: Some(Utc::now() + Duration::hours(1)),
            user_id: user_id.to_string(),
            email: "ana@example.com".to_string(),
        })
        .await;

    (ctx, user_id)
}

/// Token endpoint response for a password grant
pub fn session_json(user_id: Uuid, email: &str) -> Value {
    json!({
        "access_token": ACCESS_TOKEN,
        "refresh_token": "test_refresh_token",
        "token_type": "bearer",
        "expires_in": 3600,
        "expires_at": (Utc::now() + Duration::hours(1)).timestamp(),
        "user": {
            "id": user_id,
            "email": email,
            "user_metadata": { "full_name": "Ana Torres" }
        }
    })
}
