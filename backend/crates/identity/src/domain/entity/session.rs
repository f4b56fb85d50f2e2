//! Session Entity
//!
//! Server-side session state. The client holds only a signed token
//! carrying the session id; everything else lives here. Expiry is
//! absolute: the deadline is fixed at creation and never extended.

use chrono::{DateTime, Duration, Utc};
use kernel::id::{SessionId, UserId};

/// Server-side session
#[derive(Debug, Clone)]
pub struct Session {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session for the user, valid for `ttl_secs` from now
    pub fn new(user_id: UserId, ttl_secs: i64) -> Self {
        let now = Utc::now();
        Self {
            session_id: SessionId::new(),
            user_id,
            created_at: now,
            expires_at: now + Duration::seconds(ttl_secs),
        }
    }

    /// Whether the absolute deadline has passed
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_not_expired() {
        let session = Session::new(UserId::new(), 3600);
        assert!(!session.is_expired());
    }

    #[test]
    fn test_zero_ttl_is_expired() {
        let session = Session::new(UserId::new(), 0);
        assert!(session.is_expired());
    }

    #[test]
    fn test_deadline_is_absolute() {
        let session = Session::new(UserId::new(), 3600);
        let expected = session.created_at + Duration::seconds(3600);
        assert_eq!(session.expires_at, expected);
    }
}
