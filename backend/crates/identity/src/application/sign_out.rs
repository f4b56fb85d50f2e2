//! Sign Out Use Case
//!
//! Deletes the server-side session. Unknown or malformed tokens are
//! treated as already signed out.

use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::application::token::parse_session_token;
use crate::domain::repository::SessionRepository;
use crate::error::IdentityResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<IdentityConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<IdentityConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, session_token: &str) -> IdentityResult<()> {
        let Ok(session_id) = parse_session_token(session_token, &self.config.session_secret)
        else {
            // Nothing to delete; the handler still clears the cookie
            return Ok(());
        };

        self.session_repo.delete(session_id).await?;

        tracing::info!(session_id = %session_id, "User signed out");

        Ok(())
    }
}
