//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{PhoneChallenge, Session, User};
use crate::domain::value_object::{PhoneNumber, ProviderId, UserName};
use crate::error::IdentityResult;
use kernel::id::{SessionId, UserId};

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    ///
    /// Storage-level uniqueness on the canonical user name and the
    /// provider id is the last line of defense against concurrent
    /// registrations; a violation surfaces as a conflict error.
    async fn create(&self, user: &User) -> IdentityResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> IdentityResult<Option<User>>;

    /// Find user by user name (canonical comparison)
    async fn find_by_user_name(&self, user_name: &UserName) -> IdentityResult<Option<User>>;

    /// Find user by OAuth provider id
    async fn find_by_provider_id(&self, provider_id: &ProviderId)
    -> IdentityResult<Option<User>>;

    /// Check if a user name is already taken
    async fn exists_by_user_name(&self, user_name: &UserName) -> IdentityResult<bool>;
}

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a new session
    async fn create(&self, session: &Session) -> IdentityResult<()>;

    /// Find session by ID
    async fn find_by_id(&self, session_id: SessionId) -> IdentityResult<Option<Session>>;

    /// Delete a session (logout or expiry)
    async fn delete(&self, session_id: SessionId) -> IdentityResult<()>;

    /// Delete all sessions past their deadline, returning the count
    async fn cleanup_expired(&self) -> IdentityResult<u64>;
}

/// Phone challenge repository trait
#[trait_variant::make(ChallengeRepository: Send)]
pub trait LocalChallengeRepository {
    /// Store a challenge, replacing any pending one for the same phone
    async fn upsert(&self, challenge: &PhoneChallenge) -> IdentityResult<()>;

    /// Find the pending challenge for a phone number
    async fn find_by_phone(&self, phone: &PhoneNumber) -> IdentityResult<Option<PhoneChallenge>>;

    /// Delete the challenge for a phone number
    async fn delete(&self, phone: &PhoneNumber) -> IdentityResult<()>;
}
