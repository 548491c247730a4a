//! Claims carried by access and refresh tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims payload embedded in every token.
///
/// Access and refresh tokens share the same shape; they differ only in
/// lifetime and in how they are delivered to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the username of the principal.
    pub sub: String,
    /// Expiration timestamp (seconds since epoch).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Claims for `subject` expiring at `expires_at`.
    ///
    /// `exp` has whole-second resolution and is rounded up, so a token never
    /// expires before `expires_at`.
    pub fn new(subject: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        let mut exp = expires_at.timestamp();
        if expires_at.timestamp_subsec_nanos() > 0 {
            exp += 1;
        }
        Self {
            sub: subject.into(),
            exp: Some(exp),
        }
    }

    /// The expiry as a timestamp, if present and representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }
}
