use crate::helpers::TestApp;
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn teacher_starts_and_ends_session() {
    let app = TestApp::new().await;
    let (teacher, token) = app.teacher("turing", "EMP-5001").await;

    let (status, json) = app
        .post(
            "/api/sessions/start",
            Some(&token),
            json!({ "course_id": 42, "title": "Week 1" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["status"], "active");
    assert_eq!(json["data"]["teacher_id"], teacher.id);
    let session_id = json["data"]["id"].as_i64().unwrap();

    let (status, json) = app.get("/api/sessions/active?course_id=42", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["id"], session_id);

    let uri = format!("/api/sessions/end/{session_id}");
    let (status, json) = app.send(Method::PATCH, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "ended");
    assert!(json["data"]["ended_at"].is_string());

    let (status, json) = app.send(Method::PATCH, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_state");

    let (status, _) = app.get("/api/sessions/active?course_id=42", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = app
        .get(&format!("/api/sessions/{session_id}"), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["title"], "Week 1");
}

#[tokio::test]
async fn second_active_session_conflicts() {
    let app = TestApp::new().await;
    let (_, token) = app.teacher("hopper", "EMP-5002").await;

    let body = json!({ "course_id": 7 });
    let (status, _) = app.post("/api/sessions/start", Some(&token), body.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, json) = app.post("/api/sessions/start", Some(&token), body).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn students_cannot_manage_sessions() {
    let app = TestApp::new().await;
    let (_, teacher_token) = app.teacher("owner", "EMP-5003").await;
    let (_, other_teacher) = app.teacher("other", "EMP-5004").await;
    let (_, student_token) = app.student("pupil", "STU-5001").await;

    let (status, _) = app
        .post("/api/sessions/start", Some(&student_token), json!({ "course_id": 1 }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .post("/api/sessions/start", None, json!({ "course_id": 1 }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, json) = app
        .post("/api/sessions/start", Some(&teacher_token), json!({ "course_id": 1 }))
        .await;
    let session_id = json["data"]["id"].as_i64().unwrap();

    let uri = format!("/api/sessions/end/{session_id}");
    let (status, _) = app.send(Method::PATCH, &uri, Some(&student_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, json) = app.send(Method::PATCH, &uri, Some(&other_teacher), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"], "permission");

    let (status, _) = app
        .get(&format!("/api/sessions/{session_id}/records"), Some(&other_teacher))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn start_validates_body() {
    let app = TestApp::new().await;
    let (_, token) = app.teacher("strict", "EMP-5005").await;

    let (status, json) = app
        .post("/api/sessions/start", Some(&token), json!({ "course_id": 0 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "course_id must be positive");
}

#[tokio::test]
async fn list_sessions_filters() {
    let app = TestApp::new().await;
    let (teacher, token) = app.teacher("lister", "EMP-5006").await;

    for course_id in [10, 11] {
        app.post("/api/sessions/start", Some(&token), json!({ "course_id": course_id }))
            .await;
    }

    let (status, json) = app.get("/api/sessions", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let (_, json) = app.get("/api/sessions?course_id=11", Some(&token)).await;
    let sessions = json["data"].as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["course_id"], 11);

    let (_, json) = app
        .get(&format!("/api/sessions?teacher_id={}", teacher.id + 100), Some(&token))
        .await;
    assert!(json["data"].as_array().unwrap().is_empty());
}
