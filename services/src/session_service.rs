use crate::error::{ServiceError, ServiceResult, is_unique_violation};
use crate::user_service::{require_active, require_active_role};
use crate::validation;
use chrono::Utc;
use db::models::attendance_session::{ActiveModel, Model, SessionStatus};
use db::models::user::Role;
use db::repositories::{AttendanceSessionRepository, Repository};
use sea_orm::{DatabaseConnection, Set};

#[derive(Debug, Clone)]
pub struct OpenSession {
    pub teacher_id: i64,
    pub course_id: i64,
    pub title: Option<String>,
}

pub struct SessionService {
    db: DatabaseConnection,
}

impl SessionService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens a session for a course.
    ///
    /// The store's partial unique index on active sessions is the arbiter:
    /// of two concurrent opens for one course, exactly one insert succeeds.
    pub async fn open_session(&self, params: OpenSession) -> ServiceResult<Model> {
        if params.course_id <= 0 {
            return Err(ServiceError::Validation("course_id must be positive".into()));
        }
        let title = match params.title {
            Some(title) => {
                validation::non_blank("title", &title, validation::MAX_TITLE_LEN)?;
                Some(title.trim().to_string())
            }
            None => None,
        };
        require_active_role(&self.db, params.teacher_id, Role::Teacher).await?;

        let am = ActiveModel {
            course_id: Set(params.course_id),
            teacher_id: Set(params.teacher_id),
            title: Set(title),
            status: Set(SessionStatus::Active),
            started_at: Set(Utc::now()),
            ended_at: Set(None),
            ..Default::default()
        };

        match AttendanceSessionRepository::create(&self.db, am).await {
            Ok(session) => {
                tracing::info!(
                    session_id = session.id,
                    course_id = session.course_id,
                    teacher_id = session.teacher_id,
                    "opened attendance session"
                );
                Ok(session)
            }
            Err(e) if is_unique_violation(&e) => Err(ServiceError::Conflict(format!(
                "Course {} already has an active session",
                params.course_id
            ))),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get_active_session(&self, course_id: i64) -> ServiceResult<Model> {
        AttendanceSessionRepository::find_active_by_course(&self.db, course_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("No active session for course {course_id}"))
            })
    }

    pub async fn get_session(&self, session_id: i64) -> ServiceResult<Model> {
        AttendanceSessionRepository::find_by_id(&self.db, session_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Session {session_id} not found")))
    }

    pub async fn list_sessions(
        &self,
        course_id: Option<i64>,
        teacher_id: Option<i64>,
    ) -> ServiceResult<Vec<Model>> {
        Ok(AttendanceSessionRepository::list(&self.db, course_id, teacher_id).await?)
    }

    /// Ends a session owned by `teacher_id`.
    ///
    /// The transition is one conditional update, so of two concurrent ends
    /// one wins and the other sees `InvalidState`.
    pub async fn end_session(&self, session_id: i64, teacher_id: i64) -> ServiceResult<Model> {
        require_active(&self.db, teacher_id).await?;
        let session = self.get_session(session_id).await?;
        if session.teacher_id != teacher_id {
            return Err(ServiceError::Permission(
                "Only the teacher who opened this session can end it".into(),
            ));
        }
        if !session.is_active() {
            return Err(ServiceError::InvalidState(format!(
                "Session {session_id} has already ended"
            )));
        }

        let changed =
            AttendanceSessionRepository::end_if_active(&self.db, session_id, Utc::now()).await?;
        if changed == 0 {
            return Err(ServiceError::InvalidState(format!(
                "Session {session_id} has already ended"
            )));
        }

        let session = self.get_session(session_id).await?;
        tracing::info!(session_id, course_id = session.course_id, "ended attendance session");
        Ok(session)
    }
}
