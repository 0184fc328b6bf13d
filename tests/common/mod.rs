#![allow(dead_code)]

use attendance::config::Config;
use attendance::service::recorder::Submission;
use attendance::service::session::NewSession;
use chrono::{DateTime, TimeZone, Utc};

pub const ADMIN_PASSWORD: &str = "letmein";

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

pub fn ai_session() -> NewSession {
    NewSession {
        program: "MSc CS".into(),
        semester: "Sem 1".into(),
        subject: "AI".into(),
        time_slot: "09:00–10:00".into(),
    }
}

pub fn submission(name: &str, enrollment: &str, code: &str) -> Submission {
    Submission {
        name: name.into(),
        enrollment: enrollment.into(),
        program: "MSc CS".into(),
        semester: "Sem 1".into(),
        session_code: code.into(),
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".into(),
        jwt_secret: "test-secret".into(),
        server_addr: "127.0.0.1:0".into(),
        access_token_ttl: 900,
        admin_password: ADMIN_PASSWORD.into(),
        session_validity_secs: 300,
        qr_refresh_secs: 10,
        public_base_url: "http://localhost:8080".into(),
        rate_login_per_min: 10_000,
        rate_submit_per_min: 10_000,
        rate_protected_per_min: 10_000,
        api_prefix: "/api".into(),
        log_dir: "logs".into(),
    }
}
