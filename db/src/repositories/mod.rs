pub mod attendance_record_repository;
pub mod attendance_session_repository;
pub mod device_binding_repository;
pub mod repository;
pub mod user_repository;

pub use attendance_record_repository::AttendanceRecordRepository;
pub use attendance_session_repository::AttendanceSessionRepository;
pub use device_binding_repository::DeviceBindingRepository;
pub use repository::Repository;
pub use user_repository::UserRepository;
