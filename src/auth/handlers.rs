use crate::{
    auth::jwt::generate_access_token,
    config::Config,
    error::AppError,
    model::role::Role,
    models::{LoginReq, LoginResponse},
};
use actix_web::{HttpResponse, web};
use tracing::{info, instrument};

/// Issue a role token. Faculty need no secret; admin must present the
/// shared admin password.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 401, description = "Wrong admin password", body = Object, example = json!({
            "error": "Invalid credentials"
        }))
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_login", skip(config, req), fields(role = %req.role))]
pub async fn login(
    req: web::Json<LoginReq>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    info!("Login request received");

    if req.role == Role::Admin {
        let password = req.password.as_deref().unwrap_or_default();
        if password.is_empty() || password != config.admin_password {
            info!("Invalid credentials: admin password mismatch");
            return Err(AppError::Unauthorized("Invalid credentials"));
        }
    }

    let access_token = generate_access_token(req.role, &config.jwt_secret, config.access_token_ttl)
        .map_err(|e| AppError::Token(e.to_string()))?;

    info!("Login successful");

    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token,
        role: req.role,
        expires_in: config.access_token_ttl,
    }))
}
