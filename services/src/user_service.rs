use crate::error::{ServiceError, ServiceResult, is_unique_violation};
use crate::service::ToActiveModel;
use crate::validation;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::Utc;
use db::models::user::{self, Model, Role};
use db::repositories::{Repository, UserRepository};
use rand::rngs::OsRng;
use sea_orm::{DatabaseConnection, IntoActiveModel, Set};

#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub role: Role,
    pub username: String,
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub department: String,
    pub enrollment_number: Option<String>,
    pub employee_id: Option<String>,
}

impl RegisterUser {
    fn validate(&self) -> ServiceResult<()> {
        validation::username(&self.username)?;
        validation::email(&self.email)?;
        validation::password(&self.password)?;
        validation::non_blank("display_name", &self.display_name, 100)?;
        validation::non_blank("department", &self.department, 100)?;

        match self.role {
            Role::Student => {
                let enrollment = self.enrollment_number.as_deref().ok_or_else(|| {
                    ServiceError::Validation("Students must provide an enrollment_number".into())
                })?;
                validation::institution_id("enrollment_number", enrollment)?;
                if self.employee_id.is_some() {
                    return Err(ServiceError::Validation(
                        "Students cannot have an employee_id".into(),
                    ));
                }
            }
            Role::Teacher => {
                let employee_id = self.employee_id.as_deref().ok_or_else(|| {
                    ServiceError::Validation("Teachers must provide an employee_id".into())
                })?;
                validation::institution_id("employee_id", employee_id)?;
                if self.enrollment_number.is_some() {
                    return Err(ServiceError::Validation(
                        "Teachers cannot have an enrollment_number".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

impl ToActiveModel<user::Entity> for RegisterUser {
    fn into_active_model(self) -> ServiceResult<user::ActiveModel> {
        self.validate()?;
        let now = Utc::now();

        Ok(user::ActiveModel {
            role: Set(self.role),
            username: Set(self.username),
            email: Set(self.email.trim().to_lowercase()),
            password_hash: Set(UserService::hash_password(&self.password)?),
            display_name: Set(self.display_name.trim().to_string()),
            department: Set(self.department.trim().to_string()),
            enrollment_number: Set(self.enrollment_number),
            employee_id: Set(self.employee_id),
            admin: Set(false),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
    }
}

/// Mutable profile fields. Identity columns are deliberately absent.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub department: Option<String>,
    pub password: Option<String>,
}

pub struct UserService {
    db: DatabaseConnection,
}

impl UserService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn register(&self, params: RegisterUser) -> ServiceResult<Model> {
        if UserRepository::find_by_username(&self.db, &params.username)
            .await?
            .is_some()
        {
            return Err(ServiceError::Conflict("A user with this username already exists".into()));
        }
        if UserRepository::find_by_email(&self.db, &params.email.trim().to_lowercase())
            .await?
            .is_some()
        {
            return Err(ServiceError::Conflict("A user with this email already exists".into()));
        }

        let am = params.into_active_model()?;
        match UserRepository::create(&self.db, am).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, role = %user.role, "registered user");
                Ok(user)
            }
            Err(e) if is_unique_violation(&e) => Err(ServiceError::Conflict(
                "Username, email or institution id is already registered".into(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Checks a username/password pair. Every failure is the same `Auth` error.
    pub async fn verify_credentials(&self, username: &str, password: &str) -> ServiceResult<Model> {
        let rejected = || ServiceError::Auth("Invalid username or password".into());

        let user = UserRepository::find_by_username(&self.db, username.trim())
            .await?
            .ok_or_else(rejected)?;

        if !user.active || !Self::verify_password(&user, password) {
            return Err(rejected());
        }
        Ok(user)
    }

    pub async fn get(&self, user_id: i64) -> ServiceResult<Model> {
        UserRepository::find_by_id(&self.db, user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User {user_id} not found")))
    }

    pub async fn find_by_username(&self, username: &str) -> ServiceResult<Option<Model>> {
        Ok(UserRepository::find_by_username(&self.db, username).await?)
    }

    pub async fn find_by_enrollment_number(&self, value: &str) -> ServiceResult<Option<Model>> {
        Ok(UserRepository::find_by_enrollment_number(&self.db, value).await?)
    }

    pub async fn find_by_employee_id(&self, value: &str) -> ServiceResult<Option<Model>> {
        Ok(UserRepository::find_by_employee_id(&self.db, value).await?)
    }

    /// Deactivated accounts are refused with `Permission`.
    pub async fn update_profile(
        &self,
        user_id: i64,
        params: UpdateProfile,
    ) -> ServiceResult<Model> {
        let user = require_active(&self.db, user_id).await?;
        let mut am = user.into_active_model();

        if let Some(email) = params.email {
            validation::email(&email)?;
            am.email = Set(email.trim().to_lowercase());
        }
        if let Some(display_name) = params.display_name {
            validation::non_blank("display_name", &display_name, 100)?;
            am.display_name = Set(display_name.trim().to_string());
        }
        if let Some(department) = params.department {
            validation::non_blank("department", &department, 100)?;
            am.department = Set(department.trim().to_string());
        }
        if let Some(password) = params.password {
            validation::password(&password)?;
            am.password_hash = Set(Self::hash_password(&password)?);
        }
        am.updated_at = Set(Utc::now());

        match UserRepository::update(&self.db, am).await {
            Ok(user) => Ok(user),
            Err(e) if is_unique_violation(&e) => Err(ServiceError::Conflict(
                "A user with this email already exists".into(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Soft-deletes a user. Their history stays; new actions are refused.
    pub async fn deactivate(&self, user_id: i64) -> ServiceResult<Model> {
        let user = self.get(user_id).await?;
        if !user.active {
            return Ok(user);
        }
        let mut am = user.into_active_model();
        am.active = Set(false);
        am.updated_at = Set(Utc::now());
        let user = UserRepository::update(&self.db, am).await?;
        tracing::info!(user_id, "deactivated user");
        Ok(user)
    }

    /// Loads a user that must be active and hold `role`.
    ///
    /// Missing users are `NotFound`; wrong role or deactivated accounts are
    /// `Permission`.
    pub async fn require_active_role(&self, user_id: i64, role: Role) -> ServiceResult<Model> {
        require_active_role(&self.db, user_id, role).await
    }

    pub fn hash_password(password: &str) -> ServiceResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| ServiceError::Validation(format!("password hashing failed: {e}")))
    }

    pub fn verify_password(user: &Model, password: &str) -> bool {
        PasswordHash::new(&user.password_hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

/// Loads a user that must still be active.
pub(crate) async fn require_active(db: &DatabaseConnection, user_id: i64) -> ServiceResult<Model> {
    let user = UserRepository::find_by_id(db, user_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("User {user_id} not found")))?;

    if !user.active {
        return Err(ServiceError::Permission("Account is deactivated".into()));
    }
    Ok(user)
}

pub(crate) async fn require_active_role(
    db: &DatabaseConnection,
    user_id: i64,
    role: Role,
) -> ServiceResult<Model> {
    let user = require_active(db, user_id).await?;
    if user.role != role {
        return Err(ServiceError::Permission(format!("Only a {role} can do this")));
    }
    Ok(user)
}
