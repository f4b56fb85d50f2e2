//! Phone Registration Use Cases
//!
//! Two-step registration over a phone number:
//! 1. `StartPhoneRegistration` validates the input, parks a challenge
//!    (with the password already hashed) and sends a 6-digit code.
//! 2. `VerifyPhoneChallenge` checks the submitted code and, on success,
//!    creates the account with `phone_verified` set.
//!
//! A repeated start request for the same phone number replaces the
//! pending challenge, so only the latest code is ever valid.

use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::domain::entity::{PhoneChallenge, User};
use crate::domain::gateway::ChallengeSender;
use crate::domain::repository::{ChallengeRepository, UserRepository};
use crate::domain::value_object::{OtpCode, PhoneNumber, RawPassword, UserName};
use crate::error::{IdentityError, IdentityResult};

/// Start phone registration input
pub struct StartPhoneInput {
    pub phone: String,
    pub user_name: String,
    pub password: String,
}

/// Verify phone challenge input
pub struct VerifyPhoneInput {
    pub phone: String,
    pub code: String,
}

/// Verify phone challenge output
pub struct VerifyPhoneOutput {
    pub user_name: String,
}

/// Start phone registration use case
pub struct StartPhoneRegistration<U, C, D>
where
    U: UserRepository,
    C: ChallengeRepository,
    D: ChallengeSender,
{
    user_repo: Arc<U>,
    challenge_repo: Arc<C>,
    sender: Arc<D>,
    config: Arc<IdentityConfig>,
}

impl<U, C, D> StartPhoneRegistration<U, C, D>
where
    U: UserRepository,
    C: ChallengeRepository,
    D: ChallengeSender,
{
    pub fn new(
        user_repo: Arc<U>,
        challenge_repo: Arc<C>,
        sender: Arc<D>,
        config: Arc<IdentityConfig>,
    ) -> Self {
        Self {
            user_repo,
            challenge_repo,
            sender,
            config,
        }
    }

    pub async fn execute(&self, input: StartPhoneInput) -> IdentityResult<()> {
        let phone =
            PhoneNumber::new(&input.phone).map_err(|e| IdentityError::Validation(e.to_string()))?;
        let user_name = UserName::new(&input.user_name)
            .map_err(|e| IdentityError::Validation(e.to_string()))?;
        let password = RawPassword::new(input.password)
            .map_err(|e| IdentityError::Validation(e.to_string()))?;

        if self.user_repo.exists_by_user_name(&user_name).await? {
            return Err(IdentityError::UserNameTaken);
        }

        // Hash up front so the pending challenge never holds clear text
        let password_hash = password
            .hash(self.config.pepper())
            .map_err(|e| IdentityError::Internal(e.to_string()))?;

        let code = OtpCode::generate();
        let challenge = PhoneChallenge::new(
            phone.clone(),
            code.clone(),
            user_name,
            password_hash,
            self.config.challenge_ttl_secs(),
        );

        self.challenge_repo.upsert(&challenge).await?;
        self.sender.send(&phone, &code).await?;

        tracing::info!(phone = ?phone, "Verification code sent");

        Ok(())
    }
}

/// Verify phone challenge use case
pub struct VerifyPhoneChallenge<U, C>
where
    U: UserRepository,
    C: ChallengeRepository,
{
    user_repo: Arc<U>,
    challenge_repo: Arc<C>,
}

impl<U, C> VerifyPhoneChallenge<U, C>
where
    U: UserRepository,
    C: ChallengeRepository,
{
    pub fn new(user_repo: Arc<U>, challenge_repo: Arc<C>) -> Self {
        Self {
            user_repo,
            challenge_repo,
        }
    }

    pub async fn execute(&self, input: VerifyPhoneInput) -> IdentityResult<VerifyPhoneOutput> {
        let phone =
            PhoneNumber::new(&input.phone).map_err(|e| IdentityError::Validation(e.to_string()))?;
        let code =
            OtpCode::new(&input.code).map_err(|e| IdentityError::Validation(e.to_string()))?;

        let challenge = self
            .challenge_repo
            .find_by_phone(&phone)
            .await?
            .ok_or(IdentityError::ChallengeNotFound)?;

        if challenge.is_expired() {
            self.challenge_repo.delete(&phone).await?;
            return Err(IdentityError::ChallengeExpired);
        }

        // A wrong code keeps the challenge alive for another attempt
        // within the window.
        if !challenge.matches(&code) {
            return Err(IdentityError::InvalidCredentials);
        }

        let user = User::new_phone_verified(challenge.user_name, challenge.password_hash);
        self.user_repo.create(&user).await?;
        self.challenge_repo.delete(&phone).await?;

        tracing::info!(user_id = %user.user_id, "Phone-verified user registered");

        Ok(VerifyPhoneOutput {
            user_name: user.user_name.original().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::MemoryIdentityRepository;
    use crate::infra::sms::RecordingSender;

    struct Fixture {
        repo: Arc<MemoryIdentityRepository>,
        sender: Arc<RecordingSender>,
        config: Arc<IdentityConfig>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                repo: Arc::new(MemoryIdentityRepository::new()),
                sender: Arc::new(RecordingSender::new()),
                config: Arc::new(IdentityConfig::development()),
            }
        }

        fn start(
            &self,
        ) -> StartPhoneRegistration<
            MemoryIdentityRepository,
            MemoryIdentityRepository,
            RecordingSender,
        > {
            StartPhoneRegistration::new(
                self.repo.clone(),
                self.repo.clone(),
                self.sender.clone(),
                self.config.clone(),
            )
        }

        fn verify(&self) -> VerifyPhoneChallenge<MemoryIdentityRepository, MemoryIdentityRepository>
        {
            VerifyPhoneChallenge::new(self.repo.clone(), self.repo.clone())
        }

        async fn start_for(&self, phone: &str, user_name: &str) {
            self.start()
                .execute(StartPhoneInput {
                    phone: phone.to_string(),
                    user_name: user_name.to_string(),
                    password: "password123".to_string(),
                })
                .await
                .unwrap();
        }

        async fn last_code(&self) -> String {
            self.sender.last_code().await.unwrap()
        }
    }

    #[tokio::test]
    async fn test_full_flow_creates_verified_user() {
        let fx = Fixture::new();
        fx.start_for("09012345678", "alice").await;
        let code = fx.last_code().await;

        let out = fx
            .verify()
            .execute(VerifyPhoneInput {
                phone: "09012345678".to_string(),
                code,
            })
            .await
            .unwrap();
        assert_eq!(out.user_name, "alice");

        let user = self::lookup(&fx, "alice").await;
        assert!(user.phone_verified);
        assert!(user.has_password());

        // The challenge is consumed; the same code cannot register twice
        assert!(matches!(
            fx.verify()
                .execute(VerifyPhoneInput {
                    phone: "09012345678".to_string(),
                    code: fx.last_code().await,
                })
                .await,
            Err(IdentityError::ChallengeNotFound)
        ));
    }

    #[tokio::test]
    async fn test_wrong_code_keeps_challenge() {
        let fx = Fixture::new();
        fx.start_for("09012345678", "alice").await;
        let code = fx.last_code().await;
        let wrong = if code == "000000" { "000001" } else { "000000" };

        assert!(matches!(
            fx.verify()
                .execute(VerifyPhoneInput {
                    phone: "09012345678".to_string(),
                    code: wrong.to_string(),
                })
                .await,
            Err(IdentityError::InvalidCredentials)
        ));

        // Correct code still works afterwards
        fx.verify()
            .execute(VerifyPhoneInput {
                phone: "09012345678".to_string(),
                code,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_no_challenge_not_found() {
        let fx = Fixture::new();
        assert!(matches!(
            fx.verify()
                .execute(VerifyPhoneInput {
                    phone: "09012345678".to_string(),
                    code: "123456".to_string(),
                })
                .await,
            Err(IdentityError::ChallengeNotFound)
        ));
    }

    #[tokio::test]
    async fn test_expired_challenge_gone_and_deleted() {
        let fx = Fixture::new();
        let config = Arc::new(IdentityConfig {
            challenge_ttl: std::time::Duration::ZERO,
            ..IdentityConfig::development()
        });
        StartPhoneRegistration::new(
            fx.repo.clone(),
            fx.repo.clone(),
            fx.sender.clone(),
            config,
        )
        .execute(StartPhoneInput {
            phone: "09012345678".to_string(),
            user_name: "alice".to_string(),
            password: "password123".to_string(),
        })
        .await
        .unwrap();
        let code = fx.last_code().await;

        let input = || VerifyPhoneInput {
            phone: "09012345678".to_string(),
            code: code.clone(),
        };

        assert!(matches!(
            fx.verify().execute(input()).await,
            Err(IdentityError::ChallengeExpired)
        ));
        // Challenge was removed; a retry reports not-found
        assert!(matches!(
            fx.verify().execute(input()).await,
            Err(IdentityError::ChallengeNotFound)
        ));
    }

    #[tokio::test]
    async fn test_resend_replaces_challenge() {
        let fx = Fixture::new();
        fx.start_for("09012345678", "alice").await;
        let first_code = fx.last_code().await;
        fx.start_for("09012345678", "alice2").await;
        let second_code = fx.last_code().await;

        // The old code only survives if the draws collided
        if first_code != second_code {
            assert!(matches!(
                fx.verify()
                    .execute(VerifyPhoneInput {
                        phone: "09012345678".to_string(),
                        code: first_code,
                    })
                    .await,
                Err(IdentityError::InvalidCredentials)
            ));
        }

        let out = fx
            .verify()
            .execute(VerifyPhoneInput {
                phone: "09012345678".to_string(),
                code: second_code,
            })
            .await
            .unwrap();
        assert_eq!(out.user_name, "alice2");
    }

    #[tokio::test]
    async fn test_taken_user_name_rejected_at_start() {
        let fx = Fixture::new();
        fx.start_for("09012345678", "alice").await;
        let code = fx.last_code().await;
        fx.verify()
            .execute(VerifyPhoneInput {
                phone: "09012345678".to_string(),
                code,
            })
            .await
            .unwrap();

        assert!(matches!(
            fx.start()
                .execute(StartPhoneInput {
                    phone: "08011112222".to_string(),
                    user_name: "alice".to_string(),
                    password: "password123".to_string(),
                })
                .await,
            Err(IdentityError::UserNameTaken)
        ));
    }

    async fn lookup(fx: &Fixture, user_name: &str) -> User {
        fx.repo
            .find_by_user_name(&UserName::new(user_name).unwrap())
            .await
            .unwrap()
            .unwrap()
    }
}
