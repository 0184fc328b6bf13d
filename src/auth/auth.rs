use crate::auth::jwt::verify_token;
use crate::config::Config;
use crate::error::AppError;
use crate::model::role::Role;
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, web::Data};
use futures::future::{Ready, ready};

/// Role context of the caller, taken from the bearer token on every request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub role: Role,
    pub jti: String,
}

impl AuthContext {
    pub fn from_token(token: &str, secret: &str) -> Result<Self, AppError> {
        let claims = verify_token(token, secret).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AppError::Unauthorized("Invalid or expired token")
        })?;

        let role = Role::from_id(claims.role).ok_or(AppError::Unauthorized("Invalid role"))?;

        Ok(AuthContext {
            role,
            jti: claims.jti,
        })
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin only"))
        }
    }

    pub fn require_faculty_or_admin(&self) -> Result<(), AppError> {
        if matches!(self.role, Role::Admin | Role::Faculty) {
            Ok(())
        } else {
            Err(AppError::Forbidden("Faculty/Admin only"))
        }
    }
}

fn extract(req: &HttpRequest) -> Result<AuthContext, AppError> {
    // Already verified by the auth middleware
    if let Some(ctx) = req.extensions().get::<AuthContext>() {
        return Ok(ctx.clone());
    }

    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized("Missing token"))?;

    let config = req
        .app_data::<Data<Config>>()
        .ok_or(AppError::Token("Config missing".to_string()))?;

    AuthContext::from_token(token, &config.jwt_secret)
}

impl FromRequest for AuthContext {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::{generate_access_token, verify_token};

    #[test]
    fn context_keeps_token_id_and_role() {
        let token = generate_access_token(Role::Faculty, "secret", 60).unwrap();
        let claims = verify_token(&token, "secret").unwrap();

        let ctx = AuthContext::from_token(&token, "secret").unwrap();
        assert_eq!(ctx.role, Role::Faculty);
        assert_eq!(ctx.jti, claims.jti);
        assert!(ctx.require_faculty_or_admin().is_ok());
        assert!(matches!(ctx.require_admin(), Err(AppError::Forbidden(_))));
    }

    #[test]
    fn garbage_token_is_unauthorized() {
        let err = AuthContext::from_token("nope", "secret").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
