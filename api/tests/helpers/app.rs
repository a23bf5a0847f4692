use api::{app, state::AppState};
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use chrono::Duration;
use db::models::user::{self, Role};
use db::test_utils::setup_test_db;
use sea_orm::{ActiveModelTrait, IntoActiveModel, Set};
use serde_json::Value;
use services::identity::JwtIdentityProvider;
use services::user_service::RegisterUser;
use std::sync::Arc;
use tower::ServiceExt;

/// Router over a fresh in-memory database, plus shortcuts for seeding users.
pub struct TestApp {
    pub state: AppState,
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = setup_test_db().await;
        Self::with_state(AppState::new(
            db,
            Arc::new(JwtIdentityProvider::new("test-secret", 60)),
            Duration::minutes(15),
        ))
    }

    pub fn with_state(state: AppState) -> Self {
        let router = app(state.clone());
        Self { state, router }
    }

    async fn register(&self, params: RegisterUser) -> (user::Model, String) {
        let user = self
            .state
            .users()
            .register(params)
            .await
            .expect("register user");
        let token = self.token_for(&user);
        (user, token)
    }

    pub fn token_for(&self, user: &user::Model) -> String {
        self.state.identity().issue(user).expect("issue token").token
    }

    pub async fn student(&self, username: &str, enrollment: &str) -> (user::Model, String) {
        self.register(RegisterUser {
            role: Role::Student,
            username: username.into(),
            email: format!("{username}@campus.test"),
            password: "password123".into(),
            display_name: username.into(),
            department: "Computer Science".into(),
            enrollment_number: Some(enrollment.into()),
            employee_id: None,
        })
        .await
    }

    pub async fn teacher(&self, username: &str, employee_id: &str) -> (user::Model, String) {
        self.register(RegisterUser {
            role: Role::Teacher,
            username: username.into(),
            email: format!("{username}@campus.test"),
            password: "password123".into(),
            display_name: username.into(),
            department: "Computer Science".into(),
            enrollment_number: None,
            employee_id: Some(employee_id.into()),
        })
        .await
    }

    /// A teacher account with the admin flag set.
    pub async fn admin(&self) -> (user::Model, String) {
        let (user, _) = self.teacher("root", "EMP-0000").await;
        let mut am = user.into_active_model();
        am.admin = Set(true);
        let user = am.update(self.state.db()).await.expect("promote admin");
        let token = self.token_for(&user);
        (user, token)
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let req = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }
}
