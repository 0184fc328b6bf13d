use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Session {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "048213")]
    pub code: String,

    #[schema(example = "MSc CS")]
    pub program: String,

    #[schema(example = "Sem 1")]
    pub semester: String,

    #[schema(example = "AI")]
    pub subject: String,

    #[schema(example = "09:00-10:00")]
    pub time_slot: String,

    /// Unix seconds
    pub created_at: i64,

    /// Unix seconds; the session is expired from this instant on
    pub expires_at: i64,
}

impl Session {
    pub fn is_active(&self, at: DateTime<Utc>) -> bool {
        is_active(self.expires_at, at)
    }

    pub fn expires_at_utc(&self) -> DateTime<Utc> {
        from_unix(self.expires_at)
    }
}

/// Active strictly before expiry, expired at and after it.
pub fn is_active(expires_at: i64, at: DateTime<Utc>) -> bool {
    at.timestamp() < expires_at
}

pub fn from_unix(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn active_exactly_before_expiry(expires_at in 1i64..4_000_000_000, at in 0i64..4_000_000_000) {
            let t = Utc.timestamp_opt(at, 0).unwrap();
            prop_assert_eq!(is_active(expires_at, t), at < expires_at);
        }
    }

    #[test]
    fn expiry_instant_is_already_expired() {
        let t = Utc.timestamp_opt(300, 0).unwrap();
        assert!(!is_active(300, t));
        assert!(is_active(301, t));
    }
}
