//! Attendance windows: code issue, validity lookup and the display payload.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::info;
use utoipa::ToSchema;

use super::required;
use crate::error::AppError;
use crate::model::session::{Session, from_unix};

/// Codes are zero-padded decimal strings of this length. Two live sessions
/// can draw the same code; lookups then resolve to the newest one.
pub const CODE_DIGITS: u32 = 6;

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct NewSession {
    #[schema(example = "MSc CS")]
    pub program: String,
    #[schema(example = "Sem 1")]
    pub semester: String,
    #[schema(example = "AI")]
    pub subject: String,
    #[schema(example = "09:00-10:00")]
    pub time_slot: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionCode {
    #[schema(example = "048213")]
    pub code: String,
    #[schema(value_type = String, format = DateTime)]
    pub expires_at: DateTime<Utc>,
}

/// What a display surface needs to re-render the scannable code.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionDisplay {
    pub code: String,
    pub subject: String,
    pub time_slot: String,
    /// Opaque lookup string to encode in the QR image
    #[schema(example = "http://localhost:8080/attend?code=048213&t=173456789")]
    pub payload: String,
    pub bucket: i64,
    /// Seconds until the bucket rolls over
    pub refresh_in_secs: i64,
    #[schema(value_type = String, format = DateTime)]
    pub expires_at: DateTime<Utc>,
}

pub fn generate_code() -> String {
    let n = rand::thread_rng().gen_range(0..10u32.pow(CODE_DIGITS));
    format!("{:0width$}", n, width = CODE_DIGITS as usize)
}

pub async fn start_session(
    pool: &SqlitePool,
    new: &NewSession,
    validity: Duration,
    now: DateTime<Utc>,
) -> Result<SessionCode, AppError> {
    let program = required(&new.program, "program")?;
    let semester = required(&new.semester, "semester")?;
    let subject = required(&new.subject, "subject")?;
    let time_slot = required(&new.time_slot, "time_slot")?;

    let code = generate_code();
    let expires_at = now
        .checked_add_signed(validity)
        .ok_or_else(|| AppError::Validation("validity window out of range".to_string()))?
        .timestamp();

    sqlx::query(
        r#"
        INSERT INTO sessions (code, program, semester, subject, time_slot, created_at, expires_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&code)
    .bind(program)
    .bind(semester)
    .bind(subject)
    .bind(time_slot)
    .bind(now.timestamp())
    .bind(expires_at)
    .execute(pool)
    .await?;

    info!(%code, subject, time_slot, expires_at, "Attendance session started");

    Ok(SessionCode {
        code,
        expires_at: from_unix(expires_at),
    })
}

/// Newest session carrying `code` that is still active at `at`.
///
/// Unknown and expired codes both come back as `None`.
pub async fn is_session_valid<'e, E>(
    executor: E,
    code: &str,
    at: DateTime<Utc>,
) -> Result<Option<Session>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let candidates = sqlx::query_as::<_, Session>(
        r#"
        SELECT id, code, program, semester, subject, time_slot, created_at, expires_at
        FROM sessions
        WHERE code = ?
        ORDER BY id DESC
        "#,
    )
    .bind(code.trim())
    .fetch_all(executor)
    .await?;

    Ok(candidates.into_iter().find(|s| s.is_active(at)))
}

pub fn refresh_bucket(now: DateTime<Utc>, refresh_secs: i64) -> i64 {
    now.timestamp().div_euclid(refresh_secs)
}

pub fn lookup_payload(base_url: &str, code: &str, now: DateTime<Utc>, refresh_secs: i64) -> String {
    format!(
        "{}/attend?code={}&t={}",
        base_url.trim_end_matches('/'),
        code,
        refresh_bucket(now, refresh_secs)
    )
}

pub fn display_for(
    session: &Session,
    base_url: &str,
    now: DateTime<Utc>,
    refresh_secs: i64,
) -> SessionDisplay {
    SessionDisplay {
        code: session.code.clone(),
        subject: session.subject.clone(),
        time_slot: session.time_slot.clone(),
        payload: lookup_payload(base_url, &session.code, now, refresh_secs),
        bucket: refresh_bucket(now, refresh_secs),
        refresh_in_secs: refresh_secs - now.timestamp().rem_euclid(refresh_secs),
        expires_at: session.expires_at_utc(),
    }
}
