use anyhow::{Context, Result};
use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// One week; anything longer is a misconfiguration, not an attendance window.
pub const MAX_SESSION_VALIDITY_SECS: i64 = 7 * 24 * 60 * 60;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub access_token_ttl: usize,

    /// Shared secret for the admin view, compared as-is
    pub admin_password: String,

    // Attendance windows
    pub session_validity_secs: i64,
    pub qr_refresh_secs: i64,
    pub public_base_url: String,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_submit_per_min: u32,
    pub rate_protected_per_min: u32,

    pub api_prefix: String,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server_addr: var_or("SERVER_ADDR", "127.0.0.1:8080"),
            database_url: var_or("DATABASE_URL", "sqlite://attendance.db"),
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            admin_password: env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD must be set")?,
            access_token_ttl: parse_or("ACCESS_TOKEN_TTL", "900")?, // default 15 min

            session_validity_secs: bounded(
                parse_or("SESSION_VALIDITY_SECS", "300")?,
                "SESSION_VALIDITY_SECS",
                MAX_SESSION_VALIDITY_SECS,
            )?,
            qr_refresh_secs: bounded(
                parse_or("QR_REFRESH_SECS", "10")?,
                "QR_REFRESH_SECS",
                MAX_SESSION_VALIDITY_SECS,
            )?,
            public_base_url: var_or("PUBLIC_BASE_URL", "http://localhost:8080")
                .trim_end_matches('/')
                .to_string(),

            rate_login_per_min: parse_or("RATE_LOGIN_PER_MIN", "60")?,
            rate_submit_per_min: parse_or("RATE_SUBMIT_PER_MIN", "120")?,
            rate_protected_per_min: parse_or("RATE_PROTECTED_PER_MIN", "1000")?,

            api_prefix: var_or("API_PREFIX", "/api"),
            log_dir: var_or("LOG_DIR", "logs"),
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    parse_value(key, &var_or(key, default))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid {key} value {raw:?}: {e}"))
}

fn bounded(value: i64, key: &str, max: i64) -> Result<i64> {
    if value <= 0 {
        anyhow::bail!("{key} must be greater than zero");
    }
    if value > max {
        anyhow::bail!("{key} must be at most {max} seconds");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_with_surrounding_whitespace() {
        let ttl: usize = parse_value("ACCESS_TOKEN_TTL", " 900 ").unwrap();
        assert_eq!(ttl, 900);
    }

    #[test]
    fn rejects_garbage_numbers() {
        let err = parse_value::<u32>("RATE_LOGIN_PER_MIN", "lots").unwrap_err();
        assert!(err.to_string().contains("RATE_LOGIN_PER_MIN"));
    }

    #[test]
    fn validity_window_must_be_positive() {
        assert!(bounded(0, "SESSION_VALIDITY_SECS", MAX_SESSION_VALIDITY_SECS).is_err());
        assert_eq!(
            bounded(300, "SESSION_VALIDITY_SECS", MAX_SESSION_VALIDITY_SECS).unwrap(),
            300
        );
    }

    #[test]
    fn oversized_validity_window_is_rejected() {
        let err = bounded(i64::MAX, "SESSION_VALIDITY_SECS", MAX_SESSION_VALIDITY_SECS)
            .unwrap_err();
        assert!(err.to_string().contains("at most"));
        assert!(
            bounded(
                MAX_SESSION_VALIDITY_SECS,
                "SESSION_VALIDITY_SECS",
                MAX_SESSION_VALIDITY_SECS
            )
            .is_ok()
        );
    }
}
