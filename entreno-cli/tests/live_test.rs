//! Acceptance run against a real project.
//!
//! Needs `ENTRENO_BACKEND_URL`, `ENTRENO_ANON_KEY`, `E2E_EMAIL` and
//! `E2E_PASSWORD`. Run with `cargo test -- --ignored`.

use entreno_cli::config::Config;
use entreno_cli::context::AppContext;
use entreno_cli::session::{navigate, AuthState, GuardDecision, Route};

#[tokio::test]
#[ignore]
async fn test_live_sign_in_reaches_dashboard() {
    let email = std::env::var("E2E_EMAIL").expect("E2E_EMAIL not set");
    let password = std::env::var("E2E_PASSWORD").expect("E2E_PASSWORD not set");

    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
    let ctx = AppContext::boot(config, None).await.unwrap();

    ctx.session.sign_in(&email, &password).await.unwrap();
    assert!(matches!(ctx.auth_state(), AuthState::Authenticated(_)));
    assert_eq!(
        navigate("/dashboard", &ctx.auth_state()),
        GuardDecision::Render(Route::Dashboard)
    );

    ctx.session.sign_out().await.unwrap();
    ctx.shutdown().await;
}
