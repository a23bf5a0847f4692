use crate::models::attendance_record::{Column, Entity, Model};
use crate::repositories::repository::Repository;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

pub struct AttendanceRecordRepository;

impl Repository<Entity> for AttendanceRecordRepository {}

impl AttendanceRecordRepository {
    pub async fn find<C: ConnectionTrait>(
        db: &C,
        session_id: i64,
        student_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id((session_id, student_id)).one(db).await
    }

    pub async fn list_for_session<C: ConnectionTrait>(
        db: &C,
        session_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::SessionId.eq(session_id))
            .order_by_asc(Column::MarkedAt)
            .all(db)
            .await
    }

    pub async fn list_for_student<C: ConnectionTrait>(
        db: &C,
        student_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::MarkedAt)
            .all(db)
            .await
    }

    pub async fn count_for_session<C: ConnectionTrait>(
        db: &C,
        session_id: i64,
    ) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::SessionId.eq(session_id))
            .count(db)
            .await
    }
}
