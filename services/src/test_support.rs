use crate::user_service::{RegisterUser, UserService};
use db::models::user::{Model, Role};
use sea_orm::DatabaseConnection;

pub fn student(username: &str, enrollment: &str) -> RegisterUser {
    RegisterUser {
        role: Role::Student,
        username: username.into(),
        email: format!("{username}@campus.test"),
        password: "password123".into(),
        display_name: username.into(),
        department: "Computer Science".into(),
        enrollment_number: Some(enrollment.into()),
        employee_id: None,
    }
}

pub fn teacher(username: &str, employee_id: &str) -> RegisterUser {
    RegisterUser {
        role: Role::Teacher,
        username: username.into(),
        email: format!("{username}@campus.test"),
        password: "password123".into(),
        display_name: username.into(),
        department: "Computer Science".into(),
        enrollment_number: None,
        employee_id: Some(employee_id.into()),
    }
}

pub async fn register(db: &DatabaseConnection, params: RegisterUser) -> Model {
    UserService::new(db.clone())
        .register(params)
        .await
        .expect("register user")
}
