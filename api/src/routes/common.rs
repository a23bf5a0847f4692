//! Response shapes shared by several route groups.

use chrono::{DateTime, Utc};
use db::models::{
    attendance_record::{self, AttendanceSource},
    attendance_session::{self, SessionStatus},
    device_binding,
    user::{self, Role},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub role: Role,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub department: String,
    pub enrollment_number: Option<String>,
    pub employee_id: Option<String>,
    pub admin: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            role: user.role,
            username: user.username,
            email: user.email,
            display_name: user.display_name,
            department: user.department,
            enrollment_number: user.enrollment_number,
            employee_id: user.employee_id,
            admin: user.admin,
            active: user.active,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: i64,
    pub course_id: i64,
    pub teacher_id: i64,
    pub title: Option<String>,
    pub status: SessionStatus,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl From<attendance_session::Model> for SessionResponse {
    fn from(s: attendance_session::Model) -> Self {
        Self {
            id: s.id,
            course_id: s.course_id,
            teacher_id: s.teacher_id,
            title: s.title,
            status: s.status,
            started_at: s.started_at,
            ended_at: s.ended_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AttendanceRecordResponse {
    pub session_id: i64,
    pub student_id: i64,
    pub marked_at: DateTime<Utc>,
    pub source: AttendanceSource,
    pub device_id: Option<String>,
}

impl From<attendance_record::Model> for AttendanceRecordResponse {
    fn from(r: attendance_record::Model) -> Self {
        Self {
            session_id: r.session_id,
            student_id: r.student_id,
            marked_at: r.marked_at,
            source: r.source,
            device_id: r.device_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeviceResponse {
    pub id: i64,
    pub device_id: String,
    pub user_id: i64,
    pub device_name: String,
    pub device_model: String,
    pub bound_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub unbound_at: Option<DateTime<Utc>>,
    pub active: bool,
}

impl From<device_binding::Model> for DeviceResponse {
    fn from(d: device_binding::Model) -> Self {
        Self {
            active: d.is_active(),
            id: d.id,
            device_id: d.device_id,
            user_id: d.user_id,
            device_name: d.device_name,
            device_model: d.device_model,
            bound_at: d.bound_at,
            last_used_at: d.last_used_at,
            unbound_at: d.unbound_at,
        }
    }
}
