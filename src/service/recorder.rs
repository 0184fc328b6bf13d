use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

use super::session::is_session_valid;
use crate::error::AppError;
use crate::model::attendance::AttendanceEvent;
use crate::model::student::Student;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    ToSchema,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    Recorded,
    AlreadyRecorded,
    InvalidSession,
    ValidationFailed,
}

impl Outcome {
    pub fn message(self) -> &'static str {
        match self {
            Outcome::Recorded => "Attendance marked successfully",
            Outcome::AlreadyRecorded => "Attendance already marked for this session",
            Outcome::InvalidSession => "Invalid or expired session code",
            Outcome::ValidationFailed => "Name, enrollment and session code are required",
        }
    }
}

/// Absent keys read as blank so they reach the required-field check.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct Submission {
    #[schema(example = "Asha Rao")]
    pub name: String,
    #[schema(example = "E1")]
    pub enrollment: String,
    #[schema(example = "MSc CS")]
    pub program: String,
    #[schema(example = "Sem 1")]
    pub semester: String,
    #[schema(example = "048213")]
    pub session_code: String,
}

/// Records `submission` against the session its code resolves to at `at`.
///
/// The student row is written first so the transaction holds the store's
/// write lock before the duplicate check; the UNIQUE(student_id, session_id)
/// constraint backs that check.
#[instrument(
    name = "attendance_submit",
    skip(pool, submission),
    fields(enrollment = %submission.enrollment.trim(), code = %submission.session_code.trim())
)]
pub async fn submit(
    pool: &SqlitePool,
    submission: &Submission,
    at: DateTime<Utc>,
) -> Result<Outcome, AppError> {
    let name = submission.name.trim();
    let enrollment = submission.enrollment.trim();
    let code = submission.session_code.trim();

    if name.is_empty() || enrollment.is_empty() || code.is_empty() {
        debug!("Validation failed: missing required field");
        return Ok(Outcome::ValidationFailed);
    }

    let mut tx = pool.begin().await?;

    // First registration wins; later submissions never rewrite the student.
    sqlx::query(
        r#"
        INSERT INTO students (full_name, enrollment, program, semester)
        VALUES (?, ?, ?, ?)
        ON CONFLICT (enrollment) DO NOTHING
        "#,
    )
    .bind(name)
    .bind(enrollment)
    .bind(submission.program.trim())
    .bind(submission.semester.trim())
    .execute(&mut *tx)
    .await?;

    let student = sqlx::query_as::<_, Student>(
        "SELECT id, full_name, enrollment, program, semester FROM students WHERE enrollment = ?",
    )
    .bind(enrollment)
    .fetch_one(&mut *tx)
    .await?;
    let student_id = student.id;

    let Some(session) = is_session_valid(&mut *tx, code, at).await? else {
        tx.commit().await?;
        info!(student_id, "Rejected: unknown or expired session code");
        return Ok(Outcome::InvalidSession);
    };

    let inserted = sqlx::query_as::<_, AttendanceEvent>(
        r#"
        INSERT INTO attendance_events (student_id, session_id, recorded_at)
        VALUES (?, ?, ?)
        ON CONFLICT (student_id, session_id) DO NOTHING
        RETURNING id, student_id, session_id, recorded_at
        "#,
    )
    .bind(student_id)
    .bind(session.id)
    .bind(at.timestamp())
    .fetch_optional(&mut *tx)
    .await?;

    tx.commit().await?;

    match inserted {
        Some(event) => {
            info!(
                event_id = event.id,
                student_id = event.student_id,
                session_id = event.session_id,
                "Attendance recorded"
            );
            Ok(Outcome::Recorded)
        }
        None => {
            info!(student_id, session_id = session.id, "Attendance already recorded");
            Ok(Outcome::AlreadyRecorded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_serialize_snake_case() {
        assert_eq!(Outcome::AlreadyRecorded.to_string(), "already_recorded");
        assert_eq!(Outcome::InvalidSession.as_ref(), "invalid_session");
        assert_eq!(
            serde_json::to_value(Outcome::ValidationFailed).unwrap(),
            serde_json::json!("validation_failed")
        );
    }
}
