use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// Association of a physical device with a user account.
///
/// Rows are never deleted; ending a binding stamps `unbound_at`. At most one
/// row per `device_id` and one row per `user_id` has `unbound_at IS NULL`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "device_bindings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub device_id: String,
    pub user_id: i64,
    pub device_name: String,
    pub device_model: String,
    pub bound_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub unbound_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_active(&self) -> bool {
        self.unbound_at.is_none()
    }
}
