use crate::helpers::TestApp;
use axum::http::{Method, StatusCode};
use serde_json::json;

fn bind_body(device_id: &str) -> serde_json::Value {
    json!({ "device_id": device_id, "device_name": "Galaxy", "device_model": "S24" })
}

#[tokio::test]
async fn rebinding_moves_device_to_new_owner() {
    let app = TestApp::new().await;
    let (a, a_token) = app.student("ann", "STU-8001").await;
    let (b, b_token) = app.student("bob", "STU-8002").await;

    let (status, json) = app.post("/api/devices/bind", Some(&a_token), bind_body("D")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["user_id"], a.id);
    assert_eq!(json["data"]["active"], true);

    let (status, _) = app.post("/api/devices/bind", Some(&b_token), bind_body("D")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = app.get("/api/devices/D", Some(&b_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["user_id"], b.id);

    let (status, _) = app.get("/api/devices/D", Some(&a_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, json) = app.get("/api/devices", Some(&a_token)).await;
    let history = json["data"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["active"], false);
    assert!(history[0]["unbound_at"].is_string());
}

#[tokio::test]
async fn unbind_releases_device() {
    let app = TestApp::new().await;
    let (_, a_token) = app.student("cat", "STU-8003").await;
    let (_, b_token) = app.student("dan", "STU-8004").await;
    app.post("/api/devices/bind", Some(&a_token), bind_body("tab-1")).await;

    let (status, _) = app
        .send(Method::DELETE, "/api/devices/tab-1", Some(&b_token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, json) = app
        .send(Method::DELETE, "/api/devices/tab-1", Some(&a_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["active"], false);

    let (status, _) = app.get("/api/devices/tab-1", Some(&a_token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bind_requires_auth_and_valid_body() {
    let app = TestApp::new().await;
    let (_, token) = app.student("eve", "STU-8005").await;

    let (status, _) = app.post("/api/devices/bind", None, bind_body("x")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, json) = app.post("/api/devices/bind", Some(&token), bind_body("")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation");
}
