use crate::models::attendance_session::{Column, Entity, Model, SessionStatus};
use crate::repositories::repository::Repository;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

pub struct AttendanceSessionRepository;

impl Repository<Entity> for AttendanceSessionRepository {}

impl AttendanceSessionRepository {
    pub async fn find_active_by_course<C: ConnectionTrait>(
        db: &C,
        course_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Status.eq(SessionStatus::Active))
            .one(db)
            .await
    }

    /// Lists sessions, newest first, optionally narrowed by course and/or owner.
    pub async fn list<C: ConnectionTrait>(
        db: &C,
        course_id: Option<i64>,
        teacher_id: Option<i64>,
    ) -> Result<Vec<Model>, DbErr> {
        let mut query = Entity::find();
        if let Some(course_id) = course_id {
            query = query.filter(Column::CourseId.eq(course_id));
        }
        if let Some(teacher_id) = teacher_id {
            query = query.filter(Column::TeacherId.eq(teacher_id));
        }
        query
            .order_by_desc(Column::StartedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    /// Flips `active -> ended` in a single conditional statement.
    ///
    /// Returns the number of rows changed: `1` when this call performed the
    /// transition, `0` when the session was already ended (or does not exist).
    pub async fn end_if_active<C: ConnectionTrait>(
        db: &C,
        session_id: i64,
        ended_at: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        let res = Entity::update_many()
            .col_expr(Column::Status, Expr::value(SessionStatus::Ended))
            .col_expr(Column::EndedAt, Expr::value(Some(ended_at)))
            .filter(Column::Id.eq(session_id))
            .filter(Column::Status.eq(SessionStatus::Active))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}
