use crate::error::{ServiceError, ServiceResult, is_unique_violation};
use crate::user_service::require_active_role;
use chrono::{DateTime, Duration, Utc};
use db::models::attendance_record::{ActiveModel, AttendanceSource, Model};
use db::models::user::Role;
use db::repositories::{
    AttendanceRecordRepository, AttendanceSessionRepository, DeviceBindingRepository, Repository,
};
use sea_orm::{DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

/// Largest batch a device may upload in one sync call.
pub const MAX_SYNC_BATCH: usize = 500;

/// How far in the future a device clock may claim a capture happened.
pub const CLOCK_SKEW_TOLERANCE_MINUTES: i64 = 5;

/// One mark captured on a device while it was offline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncRecord {
    pub session_id: i64,
    pub captured_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RejectedRecord {
    pub record: SyncRecord,
    pub kind: &'static str,
    pub reason: String,
}

/// Per-record verdicts of a sync batch. `accepted + rejected.len()` equals the
/// batch size.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncOutcome {
    pub accepted: usize,
    pub rejected: Vec<RejectedRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceStatus {
    pub session_id: i64,
    pub student_id: i64,
    pub marked: bool,
    pub marked_at: Option<DateTime<Utc>>,
    pub source: Option<AttendanceSource>,
}

pub struct AttendanceService {
    db: DatabaseConnection,
    sync_grace: Duration,
}

impl AttendanceService {
    pub fn new(db: DatabaseConnection, sync_grace: Duration) -> Self {
        Self { db, sync_grace }
    }

    /// Records a live mark for `student_id`, stamped with the server clock.
    ///
    /// Marking twice is not an error: a repeat (including a concurrent one
    /// that loses the insert race) returns the record that already exists.
    pub async fn mark_attendance(&self, session_id: i64, student_id: i64) -> ServiceResult<Model> {
        let session = AttendanceSessionRepository::find_by_id(&self.db, session_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Session {session_id} not found")))?;
        require_active_role(&self.db, student_id, Role::Student).await?;

        if let Some(existing) =
            AttendanceRecordRepository::find(&self.db, session_id, student_id).await?
        {
            return Ok(existing);
        }

        if !session.is_active() {
            return Err(ServiceError::InvalidState(format!(
                "Session {session_id} has ended"
            )));
        }

        let am = ActiveModel {
            session_id: Set(session_id),
            student_id: Set(student_id),
            marked_at: Set(Utc::now()),
            source: Set(AttendanceSource::Live),
            device_id: Set(None),
        };

        match AttendanceRecordRepository::create(&self.db, am).await {
            Ok(record) => {
                tracing::info!(session_id, student_id, "marked attendance");
                Ok(record)
            }
            Err(e) if is_unique_violation(&e) => {
                AttendanceRecordRepository::find(&self.db, session_id, student_id)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::Conflict("Attendance already recorded".into())
                    })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Applies a batch of offline captures from `device_id`.
    ///
    /// Each record is judged on its own and one bad record never blocks the
    /// rest. A device that is not currently bound to the student gets every
    /// record rejected with `permission`.
    pub async fn sync_attendance_batch(
        &self,
        device_id: &str,
        student_id: i64,
        records: Vec<SyncRecord>,
    ) -> ServiceResult<SyncOutcome> {
        if records.is_empty() {
            return Err(ServiceError::Validation("records cannot be empty".into()));
        }
        if records.len() > MAX_SYNC_BATCH {
            return Err(ServiceError::Validation(format!(
                "A sync batch holds at most {MAX_SYNC_BATCH} records"
            )));
        }
        require_active_role(&self.db, student_id, Role::Student).await?;

        let binding = DeviceBindingRepository::find_active_by_device(&self.db, device_id)
            .await?
            .filter(|b| b.user_id == student_id);

        let now = Utc::now();
        let mut outcome = SyncOutcome::default();

        for record in records {
            let verdict = match &binding {
                Some(_) => self.apply_synced(device_id, student_id, &record, now).await,
                None => Err(ServiceError::Permission(format!(
                    "Device {device_id} is not bound to this student"
                ))),
            };
            match verdict {
                Ok(()) => outcome.accepted += 1,
                Err(e) => {
                    if matches!(e, ServiceError::Unavailable(_) | ServiceError::Database(_)) {
                        tracing::warn!(
                            session_id = record.session_id,
                            error = %e,
                            "sync record failed"
                        );
                    }
                    outcome.rejected.push(RejectedRecord {
                        record,
                        kind: e.kind(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if let Some(binding) = binding {
            if outcome.accepted > 0 {
                DeviceBindingRepository::touch_last_used(&self.db, binding.id, now).await?;
            }
        }

        tracing::info!(
            device_id,
            student_id,
            accepted = outcome.accepted,
            rejected = outcome.rejected.len(),
            "applied sync batch"
        );
        Ok(outcome)
    }

    async fn apply_synced(
        &self,
        device_id: &str,
        student_id: i64,
        record: &SyncRecord,
        now: DateTime<Utc>,
    ) -> ServiceResult<()> {
        let session_id = record.session_id;
        let session = AttendanceSessionRepository::find_by_id(&self.db, session_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Session {session_id} not found")))?;

        if record.captured_at > now + Duration::minutes(CLOCK_SKEW_TOLERANCE_MINUTES) {
            return Err(ServiceError::Validation(
                "captured_at is in the future".into(),
            ));
        }
        if !session.accepts_capture_at(record.captured_at, self.sync_grace) {
            return Err(ServiceError::InvalidState(format!(
                "Capture falls outside the window of session {session_id}"
            )));
        }

        let duplicate = || {
            ServiceError::Conflict(format!(
                "Attendance for session {session_id} is already recorded"
            ))
        };
        if AttendanceRecordRepository::find(&self.db, session_id, student_id)
            .await?
            .is_some()
        {
            return Err(duplicate());
        }

        let am = ActiveModel {
            session_id: Set(session_id),
            student_id: Set(student_id),
            marked_at: Set(record.captured_at),
            source: Set(AttendanceSource::Synced),
            device_id: Set(Some(device_id.to_string())),
        };
        match AttendanceRecordRepository::create(&self.db, am).await {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(duplicate()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get_attendance_status(
        &self,
        session_id: i64,
        student_id: i64,
    ) -> ServiceResult<AttendanceStatus> {
        if AttendanceSessionRepository::find_by_id(&self.db, session_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::NotFound(format!("Session {session_id} not found")));
        }
        let record = AttendanceRecordRepository::find(&self.db, session_id, student_id).await?;

        Ok(AttendanceStatus {
            session_id,
            student_id,
            marked: record.is_some(),
            marked_at: record.as_ref().map(|r| r.marked_at),
            source: record.as_ref().map(|r| r.source),
        })
    }

    /// Roster of a session, visible only to its teacher.
    pub async fn list_session_attendance(
        &self,
        session_id: i64,
        teacher_id: i64,
    ) -> ServiceResult<Vec<Model>> {
        let session = AttendanceSessionRepository::find_by_id(&self.db, session_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Session {session_id} not found")))?;
        if session.teacher_id != teacher_id {
            return Err(ServiceError::Permission(
                "Only the session's teacher can view its roster".into(),
            ));
        }
        Ok(AttendanceRecordRepository::list_for_session(&self.db, session_id).await?)
    }

    pub async fn list_student_attendance(&self, student_id: i64) -> ServiceResult<Vec<Model>> {
        Ok(AttendanceRecordRepository::list_for_student(&self.db, student_id).await?)
    }
}
