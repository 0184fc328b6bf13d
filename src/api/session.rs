use crate::auth::auth::AuthContext;
use crate::config::Config;
use crate::error::AppError;
use crate::service::session::{self, NewSession, SessionDisplay};
use actix_web::{HttpResponse, web};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct StartSessionResponse {
    #[schema(example = "048213")]
    pub code: String,
    #[schema(value_type = String, format = DateTime)]
    pub expires_at: DateTime<Utc>,
    #[schema(example = 300)]
    pub validity_secs: i64,
}

/// Open an attendance window
#[utoipa::path(
    post,
    path = "/api/sessions",
    request_body = NewSession,
    responses(
        (status = 201, description = "Session started", body = StartSessionResponse),
        (status = 400, description = "Missing session details"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Session"
)]
pub async fn start_session(
    auth: AuthContext,
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    payload: web::Json<NewSession>,
) -> Result<HttpResponse, AppError> {
    auth.require_faculty_or_admin()?;

    let validity = Duration::seconds(config.session_validity_secs);
    let issued = session::start_session(pool.get_ref(), &payload, validity, Utc::now()).await?;

    Ok(HttpResponse::Created().json(StartSessionResponse {
        code: issued.code,
        expires_at: issued.expires_at,
        validity_secs: config.session_validity_secs,
    }))
}

/// Current scannable payload for an active session; poll every `refresh_in_secs`
#[utoipa::path(
    get,
    path = "/api/sessions/{code}/display",
    params(
        ("code", Path, description = "Session code")
    ),
    responses(
        (status = 200, description = "Display payload", body = SessionDisplay),
        (status = 404, description = "Unknown or expired session code"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Session"
)]
pub async fn session_display(
    auth: AuthContext,
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    code: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    auth.require_faculty_or_admin()?;

    let now = Utc::now();
    let active = session::is_session_valid(pool.get_ref(), &code, now)
        .await?
        .ok_or_else(|| AppError::NotFound("Invalid or expired session code".to_string()))?;

    Ok(HttpResponse::Ok().json(session::display_for(
        &active,
        &config.public_base_url,
        now,
        config.qr_refresh_secs,
    )))
}
