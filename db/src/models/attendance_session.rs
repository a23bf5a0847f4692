use chrono::{DateTime, Duration, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One meeting of a course that is (or was) open for attendance.
///
/// `ended_at` is `None` exactly while `status` is `Active`. A row moves from
/// `Active` to `Ended` once and is never modified afterwards.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attendance_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    /// Owning teacher.
    pub teacher_id: i64,
    pub title: Option<String>,
    pub status: SessionStatus,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

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
#[strum(serialize_all = "lowercase")]
pub enum SessionStatus {
    #[sea_orm(string_value = "active")]
    Active,

    #[sea_orm(string_value = "ended")]
    Ended,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TeacherId",
        to = "super::user::Column::Id"
    )]
    Teacher,
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    Records,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Records.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    /// Whether a mark captured at `captured_at` falls inside this session's window.
    ///
    /// The window opens at `started_at` and, once the session has ended, closes
    /// `grace` after `ended_at`. An active session accepts any capture from its
    /// start onwards. A close time past the last representable instant leaves
    /// the window open.
    pub fn accepts_capture_at(&self, captured_at: DateTime<Utc>, grace: Duration) -> bool {
        if captured_at < self.started_at {
            return false;
        }
        match self.ended_at {
            Some(ended_at) => ended_at
                .checked_add_signed(grace)
                .is_none_or(|closes_at| captured_at <= closes_at),
            None => true,
        }
    }
}
