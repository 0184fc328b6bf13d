use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Flat report row: one attendance event joined with its student and session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = "Asha Rao")]
    pub name: String,

    #[schema(example = "E1")]
    pub enrollment: String,

    #[schema(example = "MSc CS")]
    pub program: String,

    #[schema(example = "Sem 1")]
    pub semester: String,

    #[schema(example = "AI")]
    pub subject: String,

    #[schema(example = "09:00-10:00")]
    pub time_slot: String,

    /// UTC, `YYYY-MM-DD HH:MM:SS`
    #[schema(example = "2025-01-06 09:01:40")]
    pub recorded_at: String,
}
