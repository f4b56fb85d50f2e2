//! Resolve Session Use Case
//!
//! Turns a cookie token into the current user. The user record is
//! re-fetched on every resolve, so a deleted account invalidates its
//! sessions immediately. Expired sessions are deleted on sight.

use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::application::token::parse_session_token;
use crate::domain::entity::User;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{IdentityError, IdentityResult};

/// Resolve session use case
pub struct ResolveSessionUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<IdentityConfig>,
}

impl<U, S> ResolveSessionUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<IdentityConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    /// Resolve a token to the authenticated user
    pub async fn execute(&self, session_token: &str) -> IdentityResult<User> {
        let session_id = parse_session_token(session_token, &self.config.session_secret)?;

        let session = self
            .session_repo
            .find_by_id(session_id)
            .await?
            .ok_or(IdentityError::SessionInvalid)?;

        if session.is_expired() {
            self.session_repo.delete(session_id).await?;
            return Err(IdentityError::SessionInvalid);
        }

        self.user_repo
            .find_by_id(&session.user_id)
            .await?
            .ok_or(IdentityError::SessionInvalid)
    }

    /// Whether the token resolves to a live session
    pub async fn is_valid(&self, session_token: &str) -> bool {
        self.execute(session_token).await.is_ok()
    }
}
