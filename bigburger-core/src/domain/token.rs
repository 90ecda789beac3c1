//! Session token
//!
//! The token is an unsigned base64 JSON blob. It only carries the user id and
//! a validity window; anyone can forge one. Swap for a signed credential if
//! real security is ever needed.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Session store key the token lives under
pub const TOKEN_KEY: &str = "bigburger_auth_token";

pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    pub user_id: String,
    /// Issued at, millis since epoch
    pub iat: i64,
    /// Expires at, millis since epoch
    pub exp: i64,
}

impl AuthToken {
    pub fn issue(user_id: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = now.timestamp_millis();
        Self {
            user_id: user_id.into(),
            iat,
            exp: iat.saturating_add(ttl.num_milliseconds()),
        }
    }

    pub fn encode(&self) -> String {
        // Serializing a struct of strings and integers cannot fail
        let json = serde_json::to_vec(self).unwrap_or_default();
        STANDARD.encode(json)
    }

    /// `None` for anything that is not base64 of a token payload
    pub fn decode(token: &str) -> Option<Self> {
        let bytes = STANDARD.decode(token.trim()).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp_millis()
    }

    /// Decodes and is not yet expired
    pub fn is_valid(token: &str, now: DateTime<Utc>) -> bool {
        Self::decode(token).is_some_and(|t| !t.is_expired(now))
    }
}
