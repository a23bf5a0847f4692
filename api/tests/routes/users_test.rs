use crate::helpers::TestApp;
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn admin_reads_and_deactivates_users() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin().await;
    let (student, student_token) = app.student("gina", "STU-9001").await;

    let uri = format!("/api/users/{}", student.id);
    let (status, json) = app.get(&uri, Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["username"], "gina");
    assert_eq!(json["data"]["active"], true);

    let (status, json) = app
        .send(Method::PATCH, &format!("{uri}/deactivate"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["active"], false);

    let (status, _) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "username": "gina", "password": "password123" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // an outstanding token cannot be used to act any more
    let (_, teacher) = app.teacher("prof", "EMP-9001").await;
    let (_, session) = app
        .post("/api/sessions/start", Some(&teacher), json!({ "course_id": 1 }))
        .await;
    let (status, _) = app
        .post(
            "/api/attendance/mark",
            Some(&student_token),
            json!({ "session_id": session["data"]["id"] }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn user_routes_are_admin_only() {
    let app = TestApp::new().await;
    let (student, token) = app.student("hal", "STU-9002").await;
    let (_, admin) = app.admin().await;

    let uri = format!("/api/users/{}", student.id);
    let (status, json) = app.get(&uri, Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "Admin access required");

    let (status, _) = app.get("/api/users/9999", Some(&admin)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deactivated_token_cannot_edit_profile() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin().await;
    let (student, token) = app.student("ivy", "STU-9003").await;

    let uri = format!("/api/users/{}/deactivate", student.id);
    let (status, _) = app.send(Method::PATCH, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = app
        .send(
            Method::PUT,
            "/api/auth/me",
            Some(&token),
            Some(json!({ "display_name": "Still Here" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "permission");

    let (_, json) = app.get(&format!("/api/users/{}", student.id), Some(&admin)).await;
    assert_eq!(json["data"]["display_name"], "ivy");
}

#[tokio::test]
async fn malformed_path_uses_error_envelope() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin().await;

    let (status, json) = app.get("/api/users/not-a-number", Some(&admin)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "validation");
}
