use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Represents a user in the `users` table.
///
/// Identity columns (`id`, `role`, `username`, `enrollment_number`,
/// `employee_id`) never change after registration. Users are deactivated,
/// not deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Student or teacher.
    pub role: Role,
    /// Unique login name.
    pub username: String,
    /// User's unique email address.
    pub email: String,
    /// Argon2 hash; never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: String,
    pub department: String,
    /// Roll number, students only.
    pub enrollment_number: Option<String>,
    /// Staff number, teachers only.
    pub employee_id: Option<String>,
    /// Whether the user has admin privileges.
    pub admin: bool,
    /// Soft-delete flag.
    pub active: bool,
    /// Timestamp when the user was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Account role. Stored as lowercase text.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Deserialize,
    Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    #[sea_orm(string_value = "student")]
    Student,

    #[sea_orm(string_value = "teacher")]
    Teacher,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance_session::Entity")]
    Sessions,
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    AttendanceRecords,
    #[sea_orm(has_many = "super::device_binding::Entity")]
    DeviceBindings,
}

impl Related<super::attendance_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecords.def()
    }
}

impl Related<super::device_binding::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeviceBindings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }

    pub fn is_teacher(&self) -> bool {
        self.role == Role::Teacher
    }
}
