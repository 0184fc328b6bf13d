use crate::service::recorder::{self, Outcome, Submission};
use crate::error::AppError;
use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct SubmitResponse {
    pub outcome: Outcome,
    #[schema(example = "Attendance marked successfully")]
    pub message: &'static str,
}

/// Submit attendance against a session code
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = Submission,
    responses(
        (status = 201, description = "Attendance recorded", body = SubmitResponse),
        (status = 200, description = "Already recorded for this session", body = SubmitResponse),
        (status = 400, description = "Name, enrollment or session code missing", body = SubmitResponse),
        (status = 404, description = "Unknown or expired session code", body = SubmitResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn submit_attendance(
    pool: web::Data<SqlitePool>,
    payload: web::Json<Submission>,
) -> Result<HttpResponse, AppError> {
    let outcome = recorder::submit(pool.get_ref(), &payload, Utc::now()).await?;

    let mut builder = match outcome {
        Outcome::Recorded => HttpResponse::Created(),
        Outcome::AlreadyRecorded => HttpResponse::Ok(),
        Outcome::InvalidSession => HttpResponse::NotFound(),
        Outcome::ValidationFailed => HttpResponse::BadRequest(),
    };

    Ok(builder.json(SubmitResponse {
        outcome,
        message: outcome.message(),
    }))
}
