use crate::models::device_binding::{Column, Entity, Model};
use crate::repositories::repository::Repository;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

pub struct DeviceBindingRepository;

impl Repository<Entity> for DeviceBindingRepository {}

impl DeviceBindingRepository {
    /// The live binding for a device, if any.
    pub async fn find_active_by_device<C: ConnectionTrait>(
        db: &C,
        device_id: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::DeviceId.eq(device_id))
            .filter(Column::UnboundAt.is_null())
            .one(db)
            .await
    }

    pub async fn find_active_by_user<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::UnboundAt.is_null())
            .one(db)
            .await
    }

    /// Binding history for a user, newest first.
    pub async fn list_for_user<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::BoundAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    /// Ends whatever live binding the device has. Returns rows changed.
    pub async fn release_device<C: ConnectionTrait>(
        db: &C,
        device_id: &str,
        at: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        let res = Entity::update_many()
            .col_expr(Column::UnboundAt, Expr::value(Some(at)))
            .filter(Column::DeviceId.eq(device_id))
            .filter(Column::UnboundAt.is_null())
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    /// Ends whatever live binding the user has. Returns rows changed.
    pub async fn release_user<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
        at: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        let res = Entity::update_many()
            .col_expr(Column::UnboundAt, Expr::value(Some(at)))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::UnboundAt.is_null())
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    pub async fn touch_last_used<C: ConnectionTrait>(
        db: &C,
        binding_id: i64,
        at: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        Entity::update_many()
            .col_expr(Column::LastUsedAt, Expr::value(Some(at)))
            .filter(Column::Id.eq(binding_id))
            .exec(db)
            .await?;
        Ok(())
    }
}
