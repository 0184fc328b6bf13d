use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::{Display, Error};
use serde_json::json;

#[derive(Debug, Display, Error)]
pub enum AppError {
    #[display(fmt = "{}", _0)]
    Validation(#[error(not(source))] String),

    #[display(fmt = "{}", _0)]
    Unauthorized(#[error(not(source))] &'static str),

    #[display(fmt = "{}", _0)]
    Forbidden(#[error(not(source))] &'static str),

    #[display(fmt = "{}", _0)]
    NotFound(#[error(not(source))] String),

    #[display(fmt = "Token error: {}", _0)]
    Token(#[error(not(source))] String),

    #[display(fmt = "Store unavailable: {}", _0)]
    Store(sqlx::Error),

    #[display(fmt = "Export failed: {}", _0)]
    Export(csv::Error),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Store(err)
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Export(err)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Token(_) | AppError::Store(_) | AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Store(e) => {
                tracing::error!(error = %e, "Store operation failed");
                "Something went wrong, Contact with system admin".to_string()
            }
            AppError::Export(e) => {
                tracing::error!(error = %e, "CSV export failed");
                "Internal Server Error".to_string()
            }
            AppError::Token(e) => {
                tracing::error!(error = %e, "Token signing failed");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        assert_eq!(
            AppError::Validation("name is required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Forbidden("Admin only").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::Store(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_errors_keep_their_source() {
        use std::error::Error as _;
        let err = AppError::from(sqlx::Error::PoolClosed);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("Store unavailable"));
    }
}
