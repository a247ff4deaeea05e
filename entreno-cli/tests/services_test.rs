mod common;

use chrono::{Duration as ChronoDuration, Utc};
use entreno_cli::models::{ProfileForm, RecordId};
use entreno_cli::services::coach::{activation_message, CoachMode, CoachSession, SUCCESS_BANNER};
use entreno_cli::services::routines::RoutineBoard;
use entreno_cli::services::workout::WorkoutTracker;
use entreno_cli::services::{exercises, history, photos, profiles, stats, workout, ServiceError};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Cursor;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn png_bytes() -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(8, 4, Rgb([200u8, 30, 30])));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

#[tokio::test]
async fn test_profile_save_upserts_then_records_history() {
    let server = MockServer::start().await;
    let (ctx, user_id) = common::signed_in_context(&server).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/profiles"))
        .and(body_partial_json(json!({ "id": user_id, "full_name": "Ana Torres", "weight": 61.5 })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/biometric_history"))
        .and(body_partial_json(json!({ "user_id": user_id, "weight": 61.5, "goal": "Fuerza" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let form = ProfileForm {
        full_name: "Ana Torres".to_string(),
        age: Some(31),
        weight: Some(61.5),
        height: Some(168.0),
        fitness_level: "Intermedio".to_string(),
        goal: "Fuerza".to_string(),
    };
    profiles::save_profile(&ctx, &form).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
    assert_eq!(paths, vec!["/rest/v1/profiles", "/rest/v1/biometric_history"]);
}

#[tokio::test]
async fn test_profile_save_survives_history_failure() {
    let server = MockServer::start().await;
    let (ctx, _) = common::signed_in_context(&server).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/biometric_history"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })))
        .mount(&server)
        .await;

    let form = ProfileForm {
        full_name: "Ana".to_string(),
        ..ProfileForm::default()
    };
    assert!(profiles::save_profile(&ctx, &form).await.is_ok());
}

#[tokio::test]
async fn test_profile_save_requires_name() {
    let server = MockServer::start().await;
    let (ctx, _) = common::signed_in_context(&server).await;

    let err = profiles::save_profile(&ctx, &ProfileForm::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_profile_loads_defaults() {
    let server = MockServer::start().await;
    let (ctx, _) = common::signed_in_context(&server).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(406).set_body_json(json!({
            "code": "PGRST116",
            "message": "JSON object requested, multiple (or no) rows returned"
        })))
        .mount(&server)
        .await;

    let form = profiles::load_profile(&ctx).await.unwrap();
    assert_eq!(form, ProfileForm::default());
}

#[tokio::test]
async fn test_coach_accept_posts_once_and_resets() {
    let server = MockServer::start().await;
    let (ctx, _) = common::signed_in_context(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/ai/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "role": "assistant",
            "content": "Te propongo esta rutina",
            "routine": {
                "name": "Torso Pierna",
                "goal": "Hipertrofia",
                "days": [{ "day_number": 1, "name": "Torso", "exercises": [] }]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/rutinas"))
        .and(body_partial_json(json!({ "name": "Torso Pierna" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 40 })))
        .expect(1)
        .mount(&server)
        .await;

    let mut coach = CoachSession::new();
    assert!(coach.send(&ctx.api, "Quiero ganar masa").await);
    assert!(coach.routine().is_some());

    coach.open_generator();
    assert_eq!(coach.mode(), CoachMode::Preview);

    coach.accept(&ctx.api).await.unwrap();
    coach.accept(&ctx.api).await.unwrap();
    assert_eq!(coach.banner(), Some(SUCCESS_BANNER));

    coach.complete_activation(Duration::from_millis(10)).await;
    assert_eq!(coach.mode(), CoachMode::Chat);
    assert!(coach.routine().is_none());
    assert!(coach.banner().is_none());

    let last = coach.messages().last().unwrap();
    assert_eq!(last.content, activation_message("Torso Pierna"));
}

#[tokio::test]
async fn test_coach_chat_failure_apologizes() {
    let server = MockServer::start().await;
    let (ctx, _) = common::signed_in_context(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/ai/chat"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut coach = CoachSession::new();
    coach.send(&ctx.api, "Hola").await;

    let contents: Vec<&str> = coach.messages().iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents.len(), 3);
    assert_eq!(contents[1], "Hola");
    assert_eq!(
        contents[2],
        "Lo siento, hubo un error al conectar con mis circuitos neuronales."
    );
}

#[tokio::test]
async fn test_coach_generation_error_is_returned() {
    let server = MockServer::start().await;
    let (ctx, _) = common::signed_in_context(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/ai/generar-rutina"))
        .and(body_partial_json(json!({ "goal": "Hipertrofia", "days": 3 })))
        .respond_with(ResponseTemplate::new(502).set_body_json(json!({ "error": "Modelo saturado" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut coach = CoachSession::new();
    coach.open_generator();
    assert_eq!(coach.mode(), CoachMode::Generate);

    let err = coach.generate(&ctx.api).await.unwrap_err();
    assert_eq!(err.to_string(), "Modelo saturado");
    assert!(!coach.is_loading());
}

#[tokio::test]
async fn test_photo_upload_removes_object_when_insert_fails() {
    let server = MockServer::start().await;
    let (ctx, _) = common::signed_in_context(&server).await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/gym-assets/selfies/.+\.jpg$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Key": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/entrenamiento_selfies"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "code": "42501",
            "message": "new row violates row-level security policy"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/storage/v1/object/gym-assets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let err = photos::upload(&ctx, &png_bytes(), "Semana 4")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "new row violates row-level security policy");
}

#[tokio::test]
async fn test_photo_upload_then_gallery() {
    let server = MockServer::start().await;
    let (ctx, user_id) = common::signed_in_context(&server).await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/gym-assets/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Key": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/entrenamiento_selfies"))
        .and(body_partial_json(json!({ "user_id": user_id, "description": "Semana 4" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/entrenamiento_selfies"))
        .and(query_param("order", "created_at.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 3,
            "user_id": user_id,
            "image_url": "https://cdn.example.com/selfies/a.jpg",
            "description": "Semana 4",
            "created_at": "2026-03-02T12:00:00Z"
        }])))
        .mount(&server)
        .await;

    let url = photos::upload(&ctx, &png_bytes(), "  Semana 4 ").await.unwrap();
    assert!(url.contains("/storage/v1/object/public/gym-assets/selfies/"));

    let gallery = photos::list(&ctx).await.unwrap();
    assert_eq!(gallery.len(), 1);
    assert_eq!(gallery[0].description.as_deref(), Some("Semana 4"));
    assert_eq!(gallery[0].date_label("%d/%m/%Y"), "02/03/2026");
}

#[tokio::test]
async fn test_routine_delete_is_optimistic_and_restores_on_failure() {
    let server = MockServer::start().await;
    let (ctx, _) = common::signed_in_context(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/rutinas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 7, "name": "Torso Pierna", "routine_days": [] },
            { "id": 8, "name": "Full Body", "routine_days": [] }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/sesiones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/rutinas/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/rutinas/8"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "No se pudo borrar" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut board = RoutineBoard::load(&ctx).await.unwrap();
    assert_eq!(board.routines.len(), 2);

    board.delete(&ctx, &RecordId::Int(7)).await.unwrap();
    let names: Vec<&str> = board.routines.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Full Body"]);

    let err = board.delete(&ctx, &RecordId::Int(8)).await.unwrap_err();
    assert_eq!(err.to_string(), "No se pudo borrar");
    assert_eq!(board.routines.len(), 1);
}

#[tokio::test]
async fn test_history_delete_drops_session() {
    let server = MockServer::start().await;
    let (ctx, _) = common::signed_in_context(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/sesiones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Pierna", "started_at": "2026-03-02T18:00:00Z", "duration_minutes": 60 },
            { "id": 2, "name": "Torso", "started_at": "2026-03-04T18:00:00Z", "duration_minutes": 45 }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/sesiones/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let mut sessions = history::list(&ctx).await.unwrap();
    history::delete(&ctx, &mut sessions, &RecordId::Int(2))
        .await
        .unwrap();

    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].display_name(), "Pierna");
}

#[tokio::test]
async fn test_exercise_library_is_scoped_to_user() {
    let server = MockServer::start().await;
    let (ctx, user_id) = common::signed_in_context(&server).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/exercises"))
        .and(query_param("user_id", format!("eq.{}", user_id)))
        .and(query_param("order", "name.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "user_id": user_id, "name": "Curl", "muscle_group": "Bíceps" },
            { "id": 2, "user_id": user_id, "name": "Remo", "muscle_group": "Espalda" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let library = exercises::list(&ctx).await.unwrap();
    assert_eq!(library.len(), 2);
    assert_eq!(library[0].name, "Curl");
}

#[tokio::test]
async fn test_exercise_delete_drops_entry() {
    let server = MockServer::start().await;
    let (ctx, user_id) = common::signed_in_context(&server).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/exercises"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "user_id": user_id, "name": "Curl", "muscle_group": "Bíceps" },
            { "id": 2, "user_id": user_id, "name": "Remo", "muscle_group": "Espalda" }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/exercises"))
        .and(query_param("id", "eq.2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut library = exercises::list(&ctx).await.unwrap();
    exercises::delete(&ctx, &mut library, &RecordId::Int(2))
        .await
        .unwrap();

    let names: Vec<&str> = library.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Curl"]);
}

#[tokio::test]
async fn test_biometric_entry_delete_drops_entry() {
    let server = MockServer::start().await;
    let (ctx, user_id) = common::signed_in_context(&server).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/biometric_history"))
        .and(query_param("user_id", format!("eq.{}", user_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 11, "weight": 80.5, "created_at": "2026-03-04T09:00:00Z" },
            { "id": 10, "weight": 81.0, "created_at": "2026-02-25T09:00:00Z" }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/biometric_history"))
        .and(query_param("id", "eq.10"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut entries = profiles::list_history(&ctx).await.unwrap();
    profiles::delete_history_entry(&ctx, &mut entries, &RecordId::Int(10))
        .await
        .unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, RecordId::Int(11));
}

#[tokio::test]
async fn test_photo_delete_drops_entry() {
    let server = MockServer::start().await;
    let (ctx, user_id) = common::signed_in_context(&server).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/entrenamiento_selfies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 4,
                "user_id": user_id,
                "image_url": "https://cdn.example.com/selfies/b.jpg",
                "created_at": "2026-03-09T12:00:00Z"
            },
            {
                "id": 3,
                "user_id": user_id,
                "image_url": "https://cdn.example.com/selfies/a.jpg",
                "created_at": "2026-03-02T12:00:00Z"
            }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/entrenamiento_selfies"))
        .and(query_param("id", "eq.4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut gallery = photos::list(&ctx).await.unwrap();
    photos::delete(&ctx, &mut gallery, &RecordId::Int(4))
        .await
        .unwrap();

    assert_eq!(gallery.len(), 1);
    assert_eq!(gallery[0].image_url, "https://cdn.example.com/selfies/a.jpg");
}

#[tokio::test]
async fn test_stats_count_distinct_days() {
    let server = MockServer::start().await;
    let (ctx, user_id) = common::signed_in_context(&server).await;
    let now = Utc::now();

    Mock::given(method("GET"))
        .and(path("/rest/v1/workout_sessions"))
        .and(query_param("user_id", format!("eq.{}", user_id)))
        .and(query_param("order", "started_at.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "started_at": now },
            { "id": 2, "started_at": now }
        ])))
        .mount(&server)
        .await;

    let stats = stats::load(&ctx).await.unwrap();
    assert_eq!(stats.total_sessions, 2);
    assert_eq!(stats.weekly_sessions, 1);
    assert_eq!(stats.constancy.len(), 8);
    assert_eq!(stats.constancy.last().map(|p| p.score), Some(25));
}

#[tokio::test]
async fn test_training_session_is_saved_once_at_the_end() {
    let server = MockServer::start().await;
    let (ctx, _) = common::signed_in_context(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/rutinas/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 12,
            "name": "Torso Pierna",
            "routine_days": [{
                "day_number": 1,
                "name": "Torso",
                "routine_exercises": [{
                    "exercise_id": 3,
                    "sets": 2,
                    "reps": 8,
                    "target_weight": 60.0,
                    "exercise": { "name": "Press de Banca Plano" }
                }]
            }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/sesiones"))
        .and(body_partial_json(json!({
            "routine_id": 12,
            "day_number": 1,
            "name": "Torso Pierna - Torso",
            "rating": 4,
            "duration_minutes": 50
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let mut tracker = WorkoutTracker::load(&ctx, "12", Some(1)).await.unwrap();
    tracker.toggle_set(0, 0).unwrap();
    tracker.set_weight(0, 1, 62.5).unwrap();

    let ended_at = tracker.started_at() + ChronoDuration::minutes(50);
    let payload = tracker.finish(ended_at, 50, 4).unwrap();
    assert_eq!(tracker.completed_sets(), 1);

    workout::save(&ctx, &payload).await.unwrap();
}
