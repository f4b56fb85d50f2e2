//! In-Memory Repository Implementation
//!
//! Backing store for tests and single-process development runs. All
//! maps sit behind one `tokio::sync::RwLock`, so the uniqueness checks
//! and the insert happen under the same write guard and two concurrent
//! registrations cannot both pass.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entity::{PhoneChallenge, Session, User};
use crate::domain::repository::{ChallengeRepository, SessionRepository, UserRepository};
use crate::domain::value_object::{PhoneNumber, ProviderId, UserName};
use crate::error::{IdentityError, IdentityResult};
use kernel::id::{SessionId, UserId};

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    sessions: HashMap<SessionId, Session>,
    challenges: HashMap<String, PhoneChallenge>,
}

/// In-memory identity repository
#[derive(Clone, Default)]
pub struct MemoryIdentityRepository {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for MemoryIdentityRepository {
    async fn create(&self, user: &User) -> IdentityResult<()> {
        let mut inner = self.inner.write().await;

        if inner
            .users
            .values()
            .any(|u| u.user_name.canonical() == user.user_name.canonical())
        {
            return Err(IdentityError::UserNameTaken);
        }

        if let Some(provider_id) = &user.provider_id {
            if inner
                .users
                .values()
                .any(|u| u.provider_id.as_ref() == Some(provider_id))
            {
                return Err(IdentityError::ProviderIdTaken);
            }
        }

        inner.users.insert(user.user_id.into_uuid(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> IdentityResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(user_id.as_uuid()).cloned())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> IdentityResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|u| u.user_name.canonical() == user_name.canonical())
            .cloned())
    }

    async fn find_by_provider_id(
        &self,
        provider_id: &ProviderId,
    ) -> IdentityResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|u| u.provider_id.as_ref() == Some(provider_id))
            .cloned())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> IdentityResult<bool> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .any(|u| u.user_name.canonical() == user_name.canonical()))
    }
}

impl SessionRepository for MemoryIdentityRepository {
    async fn create(&self, session: &Session) -> IdentityResult<()> {
        let mut inner = self.inner.write().await;
        inner.sessions.insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_by_id(&self, session_id: SessionId) -> IdentityResult<Option<Session>> {
        let inner = self.inner.read().await;
        Ok(inner.sessions.get(&session_id).cloned())
    }

    async fn delete(&self, session_id: SessionId) -> IdentityResult<()> {
        let mut inner = self.inner.write().await;
        inner.sessions.remove(&session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> IdentityResult<u64> {
        let mut inner = self.inner.write().await;
        let before = inner.sessions.len();
        inner.sessions.retain(|_, s| !s.is_expired());
        Ok((before - inner.sessions.len()) as u64)
    }
}

impl ChallengeRepository for MemoryIdentityRepository {
    async fn upsert(&self, challenge: &PhoneChallenge) -> IdentityResult<()> {
        let mut inner = self.inner.write().await;
        inner
            .challenges
            .insert(challenge.phone.as_str().to_string(), challenge.clone());
        Ok(())
    }

    async fn find_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> IdentityResult<Option<PhoneChallenge>> {
        let inner = self.inner.read().await;
        Ok(inner.challenges.get(phone.as_str()).cloned())
    }

    async fn delete(&self, phone: &PhoneNumber) -> IdentityResult<()> {
        let mut inner = self.inner.write().await;
        inner.challenges.remove(phone.as_str());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::RawPassword;

    fn user(name: &str) -> User {
        User::new_local(
            UserName::new(name).unwrap(),
            RawPassword::new("password123").unwrap().hash(None).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_user_name_uniqueness_enforced() {
        let repo = MemoryIdentityRepository::new();
        UserRepository::create(&repo, &user("alice")).await.unwrap();
        assert!(matches!(
            UserRepository::create(&repo, &user("alice")).await,
            Err(IdentityError::UserNameTaken)
        ));
    }

    #[tokio::test]
    async fn test_provider_id_uniqueness_enforced() {
        let repo = MemoryIdentityRepository::new();
        let a = User::new_provider(
            UserName::new("alice").unwrap(),
            ProviderId::new("sub-1").unwrap(),
        );
        let b = User::new_provider(
            UserName::new("bob").unwrap(),
            ProviderId::new("sub-1").unwrap(),
        );
        UserRepository::create(&repo, &a).await.unwrap();
        assert!(matches!(
            UserRepository::create(&repo, &b).await,
            Err(IdentityError::ProviderIdTaken)
        ));
    }

    #[tokio::test]
    async fn test_cleanup_expired_sessions() {
        let repo = MemoryIdentityRepository::new();
        let live = Session::new(UserId::new(), 3600);
        let dead = Session::new(UserId::new(), 0);
        SessionRepository::create(&repo, &live).await.unwrap();
        SessionRepository::create(&repo, &dead).await.unwrap();

        assert_eq!(repo.cleanup_expired().await.unwrap(), 1);
        assert!(
            SessionRepository::find_by_id(&repo, live.session_id)
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            SessionRepository::find_by_id(&repo, dead.session_id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_challenge_upsert_replaces() {
        let repo = MemoryIdentityRepository::new();
        let phone = PhoneNumber::new("09012345678").unwrap();
        let hash = RawPassword::new("password123").unwrap().hash(None).unwrap();

        let first = PhoneChallenge::new(
            phone.clone(),
            crate::domain::value_object::OtpCode::new("111111").unwrap(),
            UserName::new("alice").unwrap(),
            hash.clone(),
            600,
        );
        let second = PhoneChallenge::new(
            phone.clone(),
            crate::domain::value_object::OtpCode::new("222222").unwrap(),
            UserName::new("alice").unwrap(),
            hash,
            600,
        );

        repo.upsert(&first).await.unwrap();
        repo.upsert(&second).await.unwrap();

        let stored = repo.find_by_phone(&phone).await.unwrap().unwrap();
        assert_eq!(stored.code.as_str(), "222222");
    }
}
