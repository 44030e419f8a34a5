//! Session token data

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response of the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The issued token
    pub token: String,

    /// When the token stops being valid; `None` for tokens without a TTL
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
}

/// A session token as kept in the token store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    pub token: String,
    pub expiry: Option<DateTime<Utc>>,
}

impl StoredToken {
    pub fn new(token: &str, expiry: Option<DateTime<Utc>>) -> Self {
        Self {
            token: token.to_string(),
            expiry,
        }
    }

    /// Check if the token has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expiry {
            Some(expiry) => now >= expiry,
            None => false,
        }
    }
}

impl From<LoginResponse> for StoredToken {
    fn from(response: LoginResponse) -> Self {
        Self {
            token: response.token,
            expiry: response.expiry,
        }
    }
}
