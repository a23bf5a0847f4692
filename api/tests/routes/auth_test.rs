use crate::helpers::TestApp;
use axum::http::{Method, StatusCode};
use serde_json::json;

fn student_body(username: &str) -> serde_json::Value {
    json!({
        "role": "student",
        "username": username,
        "email": format!("{username}@campus.test"),
        "password": "password123",
        "display_name": "Alice",
        "department": "Computer Science",
        "enrollment_number": "CS-2025-001"
    })
}

#[tokio::test]
async fn register_returns_token_and_user() {
    let app = TestApp::new().await;

    let (status, json) = app.post("/api/auth/register", None, student_body("alice")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["user"]["username"], "alice");
    assert_eq!(json["data"]["user"]["role"], "student");
    assert!(json["data"]["user"].get("password_hash").is_none());
    assert!(json["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn register_rejects_bad_input_and_duplicates() {
    let app = TestApp::new().await;

    let mut body = student_body("bob");
    body["password"] = json!("short");
    let (status, json) = app.post("/api/auth/register", None, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "validation");

    let mut body = student_body("carol");
    body["enrollment_number"] = json!(null);
    let (status, _) = app.post("/api/auth/register", None, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.post("/api/auth/register", None, student_body("dave")).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, json) = app.post("/api/auth/register", None, student_body("dave")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "conflict");
}

#[tokio::test]
async fn login_and_me() {
    let app = TestApp::new().await;
    app.post("/api/auth/register", None, student_body("erin")).await;

    let (status, _) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "username": "erin", "password": "wrong-password" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, json) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "username": "erin", "password": "password123" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = json["data"]["token"].as_str().unwrap().to_string();

    let (status, json) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["username"], "erin");
    assert_eq!(json["data"]["enrollment_number"], "CS-2025-001");

    let (status, json) = app.get("/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "auth");

    let (status, _) = app.get("/api/auth/me", Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn update_me_changes_profile_only() {
    let app = TestApp::new().await;
    let (user, token) = app.teacher("frank", "EMP-4001").await;

    let (status, json) = app
        .send(
            Method::PUT,
            "/api/auth/me",
            Some(&token),
            Some(json!({ "display_name": "Prof. Frank", "department": "Physics" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["id"], user.id);
    assert_eq!(json["data"]["display_name"], "Prof. Frank");
    assert_eq!(json["data"]["department"], "Physics");
    assert_eq!(json["data"]["employee_id"], "EMP-4001");

    let (status, _) = app
        .send(
            Method::PUT,
            "/api/auth/me",
            Some(&token),
            Some(json!({ "email": "not-an-email" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
