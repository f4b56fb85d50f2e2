//! User Entity
//!
//! A single account record regardless of how it was created. The three
//! registration paths differ only in which optional fields are set:
//!
//! | path           | password_hash | provider_id | phone_verified |
//! |----------------|---------------|-------------|----------------|
//! | local          | Some          | None        | false          |
//! | OAuth provider | None          | Some        | false          |
//! | phone OTP      | Some          | None        | true           |

use crate::domain::value_object::{ProviderId, UserName, UserPassword};
use chrono::{DateTime, Utc};
use kernel::id::UserId;

/// User account
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub user_name: UserName,
    pub provider_id: Option<ProviderId>,
    pub password_hash: Option<UserPassword>,
    pub phone_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a locally-registered user (user name + password)
    pub fn new_local(user_name: UserName, password_hash: UserPassword) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            user_name,
            provider_id: None,
            password_hash: Some(password_hash),
            phone_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a user from a first OAuth provider contact
    pub fn new_provider(user_name: UserName, provider_id: ProviderId) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            user_name,
            provider_id: Some(provider_id),
            password_hash: None,
            phone_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a user who completed phone-verified registration
    pub fn new_phone_verified(user_name: UserName, password_hash: UserPassword) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            user_name,
            provider_id: None,
            password_hash: Some(password_hash),
            phone_verified: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this account can log in with a password
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::RawPassword;

    fn hash(pw: &str) -> UserPassword {
        RawPassword::new(pw).unwrap().hash(None).unwrap()
    }

    #[test]
    fn test_local_user_shape() {
        let user = User::new_local(UserName::new("alice").unwrap(), hash("password123"));
        assert!(user.has_password());
        assert!(user.provider_id.is_none());
        assert!(!user.phone_verified);
    }

    #[test]
    fn test_provider_user_has_no_password() {
        let user = User::new_provider(
            UserName::new("bob").unwrap(),
            ProviderId::new("sub-123").unwrap(),
        );
        assert!(!user.has_password());
        assert!(user.provider_id.is_some());
    }

    #[test]
    fn test_phone_user_is_verified() {
        let user = User::new_phone_verified(UserName::new("carol").unwrap(), hash("password123"));
        assert!(user.phone_verified);
        assert!(user.has_password());
    }
}
