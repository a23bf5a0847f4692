use crate::helpers::TestApp;
use api::state::AppState;
use axum::http::{Method, StatusCode};
use chrono::{DateTime, Utc};
use db::models::attendance_session;
use db::test_utils::setup_test_db;
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, Set};
use serde_json::{Value, json};

async fn bind(app: &TestApp, token: &str, device_id: &str) {
    let (status, _) = app
        .post(
            "/api/devices/bind",
            Some(token),
            json!({ "device_id": device_id, "device_name": "Phone", "device_model": "X1" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn open_session(app: &TestApp, token: &str, course_id: i64) -> Value {
    let (_, json) = app
        .post("/api/sessions/start", Some(token), json!({ "course_id": course_id }))
        .await;
    json["data"].clone()
}

#[tokio::test]
async fn sync_reports_per_record_outcome() {
    let app = TestApp::new().await;
    let (_, teacher) = app.teacher("prof", "EMP-7001").await;
    let (_, student) = app.student("sid", "STU-7001").await;
    bind(&app, &student, "dev-1").await;

    let live = open_session(&app, &teacher, 1).await;
    let closed = open_session(&app, &teacher, 2).await;
    let closed_id = closed["id"].as_i64().unwrap();
    let (_, ended) = app
        .send(
            Method::PATCH,
            &format!("/api/sessions/end/{closed_id}"),
            Some(&teacher),
            None,
        )
        .await;
    let ended_at: DateTime<Utc> = ended["data"]["ended_at"].as_str().unwrap().parse().unwrap();

    let now = Utc::now().to_rfc3339();
    let body = json!({
        "device_id": "dev-1",
        "records": [
            { "session_id": live["id"], "captured_at": now },
            { "session_id": closed_id, "captured_at": ended_at.to_rfc3339() },
            { "session_id": 9999, "captured_at": now },
        ]
    });
    let (status, json) = app.post("/api/sync/attendance", Some(&student), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["accepted"], 2);
    let rejected = json["data"]["rejected"].as_array().unwrap();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0]["kind"], "not_found");
    assert_eq!(rejected[0]["record"]["session_id"], 9999);

    // same records again: now duplicates
    let body = json!({
        "device_id": "dev-1",
        "records": [{ "session_id": live["id"], "captured_at": now }]
    });
    let (_, json) = app.post("/api/sync/attendance", Some(&student), body).await;
    assert_eq!(json["data"]["accepted"], 0);
    assert_eq!(json["data"]["rejected"][0]["kind"], "conflict");

    let (_, history) = app.get("/api/attendance/history", Some(&student)).await;
    let history = history["data"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|r| r["source"] == "synced"));
}

#[tokio::test]
async fn sync_from_foreign_device_is_refused() {
    let app = TestApp::new().await;
    let (_, teacher) = app.teacher("prof", "EMP-7002").await;
    let (_, a) = app.student("amy", "STU-7002").await;
    let (_, b) = app.student("bo", "STU-7003").await;
    let session = open_session(&app, &teacher, 5).await;

    bind(&app, &a, "shared").await;
    bind(&app, &b, "shared").await;

    let body = json!({
        "device_id": "shared",
        "records": [{ "session_id": session["id"], "captured_at": Utc::now().to_rfc3339() }]
    });
    let (status, json) = app.post("/api/sync/attendance", Some(&a), body.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["accepted"], 0);
    assert_eq!(json["data"]["rejected"][0]["kind"], "permission");

    let (_, json) = app.post("/api/sync/attendance", Some(&b), body).await;
    assert_eq!(json["data"]["accepted"], 1);
}

#[tokio::test]
async fn sync_rejects_empty_batch_and_teachers() {
    let app = TestApp::new().await;
    let (_, teacher) = app.teacher("prof", "EMP-7003").await;
    let (_, student) = app.student("cy", "STU-7004").await;

    let body = json!({ "device_id": "dev", "records": [] });
    let (status, json) = app.post("/api/sync/attendance", Some(&student), body.clone()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation");

    let (status, _) = app.post("/api/sync/attendance", Some(&teacher), body).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn oversized_configured_grace_is_clamped() {
    util::config::AppConfig::set_jwt_secret("test-secret");
    util::config::AppConfig::set_sync_grace_minutes(200_000_000_000);
    let app = TestApp::with_state(AppState::from_config(setup_test_db().await));

    let (_, teacher) = app.teacher("prof", "EMP-7090").await;
    let (_, student) = app.student("sue", "STU-7090").await;
    bind(&app, &student, "dev-g").await;

    // two sessions that ended ten days ago
    let ended_at = Utc::now() - chrono::Duration::days(10);
    let mut ids = Vec::new();
    for course_id in [90, 91] {
        let session_id = open_session(&app, &teacher, course_id).await["id"]
            .as_i64()
            .unwrap();
        let uri = format!("/api/sessions/end/{session_id}");
        let (status, _) = app.send(Method::PATCH, &uri, Some(&teacher), None).await;
        assert_eq!(status, StatusCode::OK);

        let mut am = attendance_session::Entity::find_by_id(session_id)
            .one(app.state.db())
            .await
            .unwrap()
            .unwrap()
            .into_active_model();
        am.started_at = Set(ended_at - chrono::Duration::hours(1));
        am.ended_at = Set(Some(ended_at));
        am.update(app.state.db()).await.unwrap();
        ids.push(session_id);
    }

    let body = json!({
        "device_id": "dev-g",
        "records": [
            { "session_id": ids[0], "captured_at": ended_at + chrono::Duration::days(6) },
            { "session_id": ids[1], "captured_at": ended_at + chrono::Duration::days(8) },
        ]
    });
    let (status, json) = app.post("/api/sync/attendance", Some(&student), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["accepted"], 1);
    assert_eq!(json["data"]["rejected"][0]["record"]["session_id"], ids[1]);
    assert_eq!(json["data"]["rejected"][0]["kind"], "invalid_state");
}
