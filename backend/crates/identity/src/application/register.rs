//! Register Use Case
//!
//! Local registration with user name + password. Registration does not
//! log the user in; the handler redirects to /login afterwards.

use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{RawPassword, UserName};
use crate::error::{IdentityError, IdentityResult};

/// Register input
pub struct RegisterInput {
    pub user_name: String,
    pub password: String,
}

/// Register output
pub struct RegisterOutput {
    pub user_name: String,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<IdentityConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<IdentityConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> IdentityResult<RegisterOutput> {
        let user_name = UserName::new(&input.user_name)
            .map_err(|e| IdentityError::Validation(e.to_string()))?;

        let password = RawPassword::new(input.password)
            .map_err(|e| IdentityError::Validation(e.to_string()))?;

        // Pre-check for a friendly error; the unique index still covers
        // the race where two requests pass this check concurrently.
        if self.user_repo.exists_by_user_name(&user_name).await? {
            return Err(IdentityError::UserNameTaken);
        }

        let password_hash = password
            .hash(self.config.pepper())
            .map_err(|e| IdentityError::Internal(e.to_string()))?;

        let user = User::new_local(user_name, password_hash);
        self.user_repo.create(&user).await?;

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(RegisterOutput {
            user_name: user.user_name.original().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::MemoryIdentityRepository;

    fn use_case() -> RegisterUseCase<MemoryIdentityRepository> {
        RegisterUseCase::new(
            Arc::new(MemoryIdentityRepository::new()),
            Arc::new(IdentityConfig::development()),
        )
    }

    #[tokio::test]
    async fn test_register_success() {
        let uc = use_case();
        let out = uc
            .execute(RegisterInput {
                user_name: "alice".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(out.user_name, "alice");
    }

    #[tokio::test]
    async fn test_duplicate_user_name_conflicts() {
        let uc = use_case();
        let input = || RegisterInput {
            user_name: "alice".to_string(),
            password: "password123".to_string(),
        };
        uc.execute(input()).await.unwrap();
        assert!(matches!(
            uc.execute(input()).await,
            Err(IdentityError::UserNameTaken)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_differs_only_in_case() {
        let uc = use_case();
        uc.execute(RegisterInput {
            user_name: "Alice".to_string(),
            password: "password123".to_string(),
        })
        .await
        .unwrap();
        assert!(matches!(
            uc.execute(RegisterInput {
                user_name: "ALICE".to_string(),
                password: "password123".to_string(),
            })
            .await,
            Err(IdentityError::UserNameTaken)
        ));
    }

    #[tokio::test]
    async fn test_invalid_user_name_rejected() {
        let uc = use_case();
        assert!(matches!(
            uc.execute(RegisterInput {
                user_name: "a".to_string(),
                password: "password123".to_string(),
            })
            .await,
            Err(IdentityError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        let uc = use_case();
        assert!(matches!(
            uc.execute(RegisterInput {
                user_name: "alice".to_string(),
                password: "short".to_string(),
            })
            .await,
            Err(IdentityError::Validation(_))
        ));
    }
}
