//! Authenticate Use Case
//!
//! Single entry point for establishing a session, regardless of how the
//! caller proved who they are. Local login and provider login both end
//! here, so session creation happens in exactly one place and every
//! proof path gets a session.

use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::application::token::generate_session_token;
use crate::domain::entity::{Session, User};
use crate::domain::gateway::ProviderProfile;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{RawPassword, UserName};
use crate::error::{IdentityError, IdentityResult};

/// Evidence of identity presented by the caller
pub enum CredentialProof {
    /// User name + password, verified against the stored hash
    Local { user_name: String, password: String },

    /// Profile already verified by an OAuth provider exchange
    Provider(ProviderProfile),
}

/// Authenticate output
pub struct AuthenticateOutput {
    /// Signed session token for the cookie
    pub session_token: String,
    /// The authenticated user
    pub user: User,
}

/// Authenticate use case
pub struct AuthenticateUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<IdentityConfig>,
}

impl<U, S> AuthenticateUseCase<U, S>
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

    pub async fn execute(&self, proof: CredentialProof) -> IdentityResult<AuthenticateOutput> {
        let user = match proof {
            CredentialProof::Local {
                user_name,
                password,
            } => self.verify_local(&user_name, password).await?,
            CredentialProof::Provider(profile) => self.resolve_provider(profile).await?,
        };

        let session = Session::new(user.user_id, self.config.session_ttl_secs());
        self.session_repo.create(&session).await?;

        let session_token = generate_session_token(session.session_id, &self.config.session_secret);

        tracing::info!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            "Session established"
        );

        Ok(AuthenticateOutput {
            session_token,
            user,
        })
    }

    /// Verify a user name + password pair
    ///
    /// An unknown user name, a wrong password, and an account without a
    /// password (a provider-only account) all answer the same
    /// invalid-credential failure, so a failed login cannot be used to
    /// enumerate registered names.
    async fn verify_local(&self, user_name: &str, password: String) -> IdentityResult<User> {
        let user_name =
            UserName::new(user_name).map_err(|e| IdentityError::Validation(e.to_string()))?;

        let user = self
            .user_repo
            .find_by_user_name(&user_name)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        let raw = RawPassword::new(password).map_err(|_| IdentityError::InvalidCredentials)?;

        let stored = user
            .password_hash
            .as_ref()
            .ok_or(IdentityError::InvalidCredentials)?;

        if !raw.verify(stored, self.config.pepper()) {
            return Err(IdentityError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Find or create the account for a verified provider profile
    async fn resolve_provider(&self, profile: ProviderProfile) -> IdentityResult<User> {
        if let Some(user) = self.user_repo.find_by_provider_id(&profile.subject).await? {
            return Ok(user);
        }

        // First contact: create an account with a name derived from the
        // provider profile, suffixing until it is free.
        let user_name = self.derive_user_name(profile.display_name.as_deref()).await?;
        let user = User::new_provider(user_name, profile.subject);
        self.user_repo.create(&user).await?;

        tracing::info!(user_id = %user.user_id, "Provider account created");

        Ok(user)
    }

    /// Derive a free user name from the provider display name
    async fn derive_user_name(&self, display_name: Option<&str>) -> IdentityResult<UserName> {
        let base = display_name
            .map(sanitize_name)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "user".to_string());

        if let Ok(candidate) = UserName::new(&base) {
            if !self.user_repo.exists_by_user_name(&candidate).await? {
                return Ok(candidate);
            }
        }

        // Collision or unusable base: append random digits
        for _ in 0..8 {
            let suffix = platform::crypto::random_numeric_code(4);
            if let Ok(candidate) = UserName::new(format!("{base}-{suffix}")) {
                if !self.user_repo.exists_by_user_name(&candidate).await? {
                    return Ok(candidate);
                }
            }
        }

        Err(IdentityError::Internal(
            "Could not derive a free user name".to_string(),
        ))
    }
}

/// Reduce a display name to user-name-safe characters
fn sanitize_name(display_name: &str) -> String {
    let mut out = String::with_capacity(display_name.len());
    for ch in display_name.trim().to_lowercase().chars() {
        match ch {
            'a'..='z' | '0'..='9' | '_' | '.' | '-' => out.push(ch),
            ' ' => out.push('-'),
            _ => {}
        }
    }
    let trimmed = out.trim_matches(|c| c == '.' || c == '-').to_string();
    trimmed.chars().take(24).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::register::{RegisterInput, RegisterUseCase};
    use crate::application::token::parse_session_token;
    use crate::domain::value_object::ProviderId;
    use crate::infra::memory::MemoryIdentityRepository;

    struct Fixture {
        repo: Arc<MemoryIdentityRepository>,
        config: Arc<IdentityConfig>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                repo: Arc::new(MemoryIdentityRepository::new()),
                config: Arc::new(IdentityConfig::development()),
            }
        }

        fn authenticate(
            &self,
        ) -> AuthenticateUseCase<MemoryIdentityRepository, MemoryIdentityRepository> {
            AuthenticateUseCase::new(self.repo.clone(), self.repo.clone(), self.config.clone())
        }

        async fn register(&self, user_name: &str, password: &str) {
            RegisterUseCase::new(self.repo.clone(), self.config.clone())
                .execute(RegisterInput {
                    user_name: user_name.to_string(),
                    password: password.to_string(),
                })
                .await
                .unwrap();
        }
    }

    fn profile(subject: &str, display_name: Option<&str>) -> ProviderProfile {
        ProviderProfile {
            subject: ProviderId::new(subject).unwrap(),
            display_name: display_name.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_local_login_establishes_session() {
        let fx = Fixture::new();
        fx.register("alice", "password123").await;

        let out = fx
            .authenticate()
            .execute(CredentialProof::Local {
                user_name: "alice".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap();

        // Token verifies against a stored session
        let session_id = parse_session_token(&out.session_token, &fx.config.session_secret)
            .unwrap();
        let session = SessionRepository::find_by_id(&*fx.repo, session_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            session.user_id.into_uuid(),
            out.user.user_id.into_uuid()
        );
    }

    #[tokio::test]
    async fn test_unknown_user_indistinguishable_from_wrong_password() {
        let fx = Fixture::new();
        assert!(matches!(
            fx.authenticate()
                .execute(CredentialProof::Local {
                    user_name: "ghost".to_string(),
                    password: "password123".to_string(),
                })
                .await,
            Err(IdentityError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_wrong_password_unauthorized() {
        let fx = Fixture::new();
        fx.register("alice", "password123").await;

        assert!(matches!(
            fx.authenticate()
                .execute(CredentialProof::Local {
                    user_name: "alice".to_string(),
                    password: "wrongpassword".to_string(),
                })
                .await,
            Err(IdentityError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_provider_first_contact_creates_account() {
        let fx = Fixture::new();

        let out = fx
            .authenticate()
            .execute(CredentialProof::Provider(profile(
                "sub-1",
                Some("Alice Example"),
            )))
            .await
            .unwrap();

        assert_eq!(out.user.user_name.as_str(), "alice-example");
        assert!(out.user.provider_id.is_some());
        assert!(!out.user.has_password());
    }

    #[tokio::test]
    async fn test_provider_returning_user_reuses_account() {
        let fx = Fixture::new();

        let first = fx
            .authenticate()
            .execute(CredentialProof::Provider(profile("sub-1", Some("Alice"))))
            .await
            .unwrap();
        let second = fx
            .authenticate()
            .execute(CredentialProof::Provider(profile("sub-1", Some("Alice"))))
            .await
            .unwrap();

        assert_eq!(
            first.user.user_id.into_uuid(),
            second.user.user_id.into_uuid()
        );
        // New session each login
        assert_ne!(first.session_token, second.session_token);
    }

    #[tokio::test]
    async fn test_provider_name_collision_gets_suffix() {
        let fx = Fixture::new();
        fx.register("alice", "password123").await;

        let out = fx
            .authenticate()
            .execute(CredentialProof::Provider(profile("sub-2", Some("Alice"))))
            .await
            .unwrap();

        let name = out.user.user_name.as_str();
        assert_ne!(name, "alice");
        assert!(name.starts_with("alice-"));
    }

    #[tokio::test]
    async fn test_provider_account_cannot_password_login() {
        let fx = Fixture::new();
        let out = fx
            .authenticate()
            .execute(CredentialProof::Provider(profile("sub-1", Some("Bob"))))
            .await
            .unwrap();

        assert!(matches!(
            fx.authenticate()
                .execute(CredentialProof::Local {
                    user_name: out.user.user_name.as_str().to_string(),
                    password: "password123".to_string(),
                })
                .await,
            Err(IdentityError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Alice Example"), "alice-example");
        assert_eq!(sanitize_name("  Ünïcode Náme  "), "ncode-nme");
        assert_eq!(sanitize_name("..dots.."), "dots");
        assert_eq!(sanitize_name("日本語"), "");
    }
}
