use serde::{Deserialize, Serialize};

/// One student present at one session. Never updated once written.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttendanceEvent {
    pub id: i64,
    pub student_id: i64,
    pub session_id: i64,
    /// Unix seconds
    pub recorded_at: i64,
}
