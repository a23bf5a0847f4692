use crate::helpers::TestApp;
use api::rate_limit::RateLimiter;
use api::state::AppState;
use axum::http::StatusCode;
use chrono::Duration;
use db::test_utils::setup_test_db;
use services::identity::JwtIdentityProvider;
use std::sync::Arc;

#[tokio::test]
async fn client_over_burst_gets_429() {
    let state = AppState::new(
        setup_test_db().await,
        Arc::new(JwtIdentityProvider::new("test-secret", 60)),
        Duration::minutes(15),
    )
    .with_rate_limiter(RateLimiter::new(std::time::Duration::from_secs(3600), 2));
    let app = TestApp::with_state(state);

    for _ in 0..2 {
        let (status, _) = app.get("/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, json) = app.get("/api/health", None).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "rate_limited");
    assert_eq!(json["message"], "Too many requests");
}

#[tokio::test]
async fn no_limiter_means_no_limit() {
    let app = TestApp::new().await;
    for _ in 0..20 {
        let (status, _) = app.get("/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
