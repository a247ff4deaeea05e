mod common;

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::Command;
use chrono::{Duration, Utc};
use entreno_cli::config::AuthConfig;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use uuid::Uuid;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn entreno(config: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("entreno").unwrap();
    cmd.env("ENTRENO_CONFIG", config)
        .env_remove("ENTRENO_BACKEND_URL")
        .env_remove("ENTRENO_ANON_KEY")
        .env_remove("ENTRENO_API_URL");
    cmd
}

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("entreno").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Terminal client for the Entreno fitness tracker"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("routines"))
        .stdout(predicate::str::contains("coach"));
}

#[test]
fn test_version_command() {
    let mut cmd = Command::cargo_bin("entreno").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_completions_command() {
    let mut cmd = Command::cargo_bin("entreno").unwrap();
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_entreno"));
}

#[test]
fn test_config_path_honours_env() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("custom.toml");

    entreno(&path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn test_config_init_then_show() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");

    entreno(&path)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuración creada"));
    assert!(path.exists());

    entreno(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("storage_bucket = \"gym-assets\""));

    entreno(&path)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ya existe"));
}

#[test]
fn test_protected_screen_requires_login() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");

    entreno(&path)
        .arg("routines")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No has iniciado sesión"));
}

#[test]
fn test_train_requires_login() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");

    entreno(&path)
        .args(["train", "12", "--day", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("entreno login"));
}

#[test]
fn test_whoami_when_logged_out() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");

    entreno(&path)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("No has iniciado sesión."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_progress_upload_refreshes_gallery() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    let photo_path = dir.path().join("selfie.png");
    let user_id = Uuid::new_v4();

    let mut config = common::config(&server);
    config.auth = AuthConfig {
        access_token: common::ACCESS_TOKEN.to_string(),
        refresh_token: "test_refresh_token".to_string(),
        expires_at: Some(Utc::now() + Duration::hours(1)),
        user_id: user_id.to_string(),
        email: "ana@example.com".to_string(),
    };
    config.save_to(&config_path).unwrap();

    DynamicImage::ImageRgb8(ImageBuffer::from_pixel(32, 24, Rgb([10, 120, 200])))
        .save_with_format(&photo_path, ImageFormat::Png)
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": user_id })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/gym-assets/selfies/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Key": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/entrenamiento_selfies"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/entrenamiento_selfies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 5,
            "user_id": user_id,
            "image_url": "https://cdn.example.com/selfies/c.jpg",
            "description": "Semana 6",
            "created_at": "2026-03-16T12:00:00Z"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let output = tokio::task::spawn_blocking(move || {
        entreno(&config_path)
            .env("NO_COLOR", "1")
            .args(["progress", "upload"])
            .arg(&photo_path)
            .args(["-d", "Semana 6"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("Foto subida"))
        .stdout(predicate::str::contains("16/03/2026"))
        .stdout(predicate::str::contains("Semana 6"));
}
