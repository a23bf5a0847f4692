use crate::helpers::TestApp;
use axum::http::{Method, StatusCode};
use serde_json::json;

async fn open_session(app: &TestApp, token: &str, course_id: i64) -> i64 {
    let (status, json) = app
        .post("/api/sessions/start", Some(token), json!({ "course_id": course_id }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    json["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn mark_end_then_late_mark_fails() {
    let app = TestApp::new().await;
    let (_, teacher) = app.teacher("prof", "EMP-6001").await;
    let (x, x_token) = app.student("xavier", "STU-6001").await;
    let (_, y_token) = app.student("yara", "STU-6002").await;
    let session_id = open_session(&app, &teacher, 1).await;

    let (status, json) = app
        .post("/api/attendance/mark", Some(&x_token), json!({ "session_id": session_id }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["student_id"], x.id);
    assert_eq!(json["data"]["source"], "live");

    let uri = format!("/api/sessions/end/{session_id}");
    let (status, _) = app.send(Method::PATCH, &uri, Some(&teacher), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = app
        .post("/api/attendance/mark", Some(&y_token), json!({ "session_id": session_id }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_state");

    let (status, json) = app
        .get(&format!("/api/sessions/{session_id}/records"), Some(&teacher))
        .await;
    assert_eq!(status, StatusCode::OK);
    let records = json["data"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["student_id"], x.id);
}

#[tokio::test]
async fn repeated_mark_returns_same_record() {
    let app = TestApp::new().await;
    let (_, teacher) = app.teacher("prof", "EMP-6002").await;
    let (_, token) = app.student("sam", "STU-6003").await;
    let session_id = open_session(&app, &teacher, 2).await;

    let body = json!({ "session_id": session_id });
    let (_, first) = app.post("/api/attendance/mark", Some(&token), body.clone()).await;
    let (status, second) = app.post("/api/attendance/mark", Some(&token), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["data"], second["data"]);

    let (_, json) = app.get("/api/attendance/history", Some(&token)).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn mark_requires_student_and_known_session() {
    let app = TestApp::new().await;
    let (_, teacher) = app.teacher("prof", "EMP-6003").await;
    let (_, student) = app.student("tia", "STU-6004").await;
    let session_id = open_session(&app, &teacher, 3).await;

    let (status, _) = app
        .post("/api/attendance/mark", Some(&teacher), json!({ "session_id": session_id }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, json) = app
        .post("/api/attendance/mark", Some(&student), json!({ "session_id": 9999 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn status_is_private_to_students() {
    let app = TestApp::new().await;
    let (_, teacher) = app.teacher("prof", "EMP-6004").await;
    let (a, a_token) = app.student("ann", "STU-6005").await;
    let (b, b_token) = app.student("ben", "STU-6006").await;
    let session_id = open_session(&app, &teacher, 4).await;
    app.post("/api/attendance/mark", Some(&a_token), json!({ "session_id": session_id }))
        .await;

    let (status, json) = app
        .get(&format!("/api/attendance/status?session_id={session_id}"), Some(&a_token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["marked"], true);
    assert_eq!(json["data"]["source"], "live");

    let uri = format!("/api/attendance/status?session_id={session_id}&student_id={}", a.id);
    let (status, _) = app.get(&uri, Some(&b_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, json) = app.get(&uri, Some(&teacher)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["marked"], true);

    let uri = format!("/api/attendance/status?session_id={session_id}&student_id={}", b.id);
    let (_, json) = app.get(&uri, Some(&teacher)).await;
    assert_eq!(json["data"]["marked"], false);
    assert!(json["data"]["marked_at"].is_null());
}

#[tokio::test]
async fn malformed_body_uses_error_envelope() {
    let app = TestApp::new().await;
    let (_, token) = app.student("mona", "STU-6090").await;

    let (status, json) = app.post("/api/attendance/mark", Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "validation");
    assert!(json["message"].as_str().unwrap().starts_with("Invalid request body"));

    let (status, json) = app
        .post("/api/attendance/mark", Some(&token), json!({ "session_id": "one" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation");
}

#[tokio::test]
async fn missing_query_uses_error_envelope() {
    let app = TestApp::new().await;
    let (_, token) = app.student("nils", "STU-6091").await;

    let (status, json) = app.get("/api/attendance/status", Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "validation");
    assert!(json["message"].as_str().unwrap().starts_with("Invalid query"));
}
