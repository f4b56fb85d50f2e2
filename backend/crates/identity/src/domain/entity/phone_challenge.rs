//! Phone Challenge Entity
//!
//! A pending phone-verified registration. Keyed by phone number; a new
//! request for the same number replaces the previous challenge. The
//! submitted password is hashed before it enters the challenge, so no
//! clear text is ever parked in storage.

use crate::domain::value_object::{OtpCode, PhoneNumber, UserName, UserPassword};
use chrono::{DateTime, Duration, Utc};

/// Pending phone registration awaiting code verification
#[derive(Debug, Clone)]
pub struct PhoneChallenge {
    pub phone: PhoneNumber,
    pub code: OtpCode,
    pub user_name: UserName,
    pub password_hash: UserPassword,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl PhoneChallenge {
    /// Create a challenge valid for `ttl_secs` from now
    pub fn new(
        phone: PhoneNumber,
        code: OtpCode,
        user_name: UserName,
        password_hash: UserPassword,
        ttl_secs: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            phone,
            code,
            user_name,
            password_hash,
            created_at: now,
            expires_at: now + Duration::seconds(ttl_secs),
        }
    }

    /// Whether the verification window has closed
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Compare a submitted code against the challenge code
    pub fn matches(&self, submitted: &OtpCode) -> bool {
        self.code.matches(submitted)
    }
}
