use crate::auth::auth::AuthContext;
use crate::error::AppError;
use crate::model::record::AttendanceRecord;
use crate::service::reporting;
use actix_web::{HttpResponse, http::header, web};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct AttendanceReport {
    #[schema(example = 1)]
    pub total: i64,
    pub data: Vec<AttendanceRecord>,
}

/// Full attendance history, newest first
#[utoipa::path(
    get,
    path = "/api/reports/attendance",
    responses(
        (status = 200, description = "Attendance records", body = AttendanceReport),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Report"
)]
pub async fn list_attendance(
    auth: AuthContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    auth.require_admin()?;

    let data = reporting::list_attendance(pool.get_ref()).await?;
    let total = reporting::attendance_count(pool.get_ref()).await?;
    debug!(total, rows = data.len(), "Attendance report built");

    Ok(HttpResponse::Ok().json(AttendanceReport { total, data }))
}

/// Attendance history as a CSV download
#[utoipa::path(
    get,
    path = "/api/reports/attendance/export",
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Report"
)]
pub async fn export_attendance(
    auth: AuthContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    auth.require_admin()?;

    let records = reporting::list_attendance(pool.get_ref()).await?;
    let body = reporting::export_csv(&records)?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"attendance.csv\"",
        ))
        .body(body))
}
