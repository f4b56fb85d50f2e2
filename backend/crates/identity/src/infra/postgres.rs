//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{PhoneChallenge, Session, User};
use crate::domain::repository::{ChallengeRepository, SessionRepository, UserRepository};
use crate::domain::value_object::{
    OtpCode, PhoneNumber, ProviderId, UserName, UserPassword,
};
use crate::error::{IdentityError, IdentityResult};
use kernel::id::{SessionId, UserId};

/// PostgreSQL-backed identity repository
#[derive(Clone)]
pub struct PgIdentityRepository {
    pool: PgPool,
}

impl PgIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgIdentityRepository {
    async fn create(&self, user: &User) -> IdentityResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                user_name,
                user_name_canonical,
                provider_id,
                password_hash,
                phone_verified,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.user_name.original())
        .bind(user.user_name.canonical())
        .bind(user.provider_id.as_ref().map(ProviderId::as_str))
        .bind(user.password_hash.as_ref().map(UserPassword::as_phc_string))
        .bind(user.phone_verified)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(unique_violation_to_conflict)?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> IdentityResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                provider_id,
                password_hash,
                phone_verified,
                created_at,
                updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> IdentityResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                provider_id,
                password_hash,
                phone_verified,
                created_at,
                updated_at
            FROM users
            WHERE user_name_canonical = $1
            "#,
        )
        .bind(user_name.canonical())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_provider_id(
        &self,
        provider_id: &ProviderId,
    ) -> IdentityResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                provider_id,
                password_hash,
                phone_verified,
                created_at,
                updated_at
            FROM users
            WHERE provider_id = $1
            "#,
        )
        .bind(provider_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> IdentityResult<bool> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM users WHERE user_name_canonical = $1)",
        )
        .bind(user_name.canonical())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists.0)
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgIdentityRepository {
    async fn create(&self, session: &Session) -> IdentityResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (session_id, user_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(session.user_id.as_uuid())
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, session_id: SessionId) -> IdentityResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT session_id, user_id, created_at, expires_at
            FROM sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SessionRow::into_session))
    }

    async fn delete(&self, session_id: SessionId) -> IdentityResult<()> {
        sqlx::query("DELETE FROM sessions WHERE session_id = $1")
            .bind(session_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> IdentityResult<u64> {
        let deleted = sqlx::query("DELETE FROM sessions WHERE expires_at < $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Challenge Repository Implementation
// ============================================================================

impl ChallengeRepository for PgIdentityRepository {
    async fn upsert(&self, challenge: &PhoneChallenge) -> IdentityResult<()> {
        sqlx::query(
            r#"
            INSERT INTO phone_challenges (
                phone,
                code,
                user_name,
                password_hash,
                created_at,
                expires_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (phone) DO UPDATE SET
                code = EXCLUDED.code,
                user_name = EXCLUDED.user_name,
                password_hash = EXCLUDED.password_hash,
                created_at = EXCLUDED.created_at,
                expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(challenge.phone.as_str())
        .bind(challenge.code.as_str())
        .bind(challenge.user_name.original())
        .bind(challenge.password_hash.as_phc_string())
        .bind(challenge.created_at)
        .bind(challenge.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> IdentityResult<Option<PhoneChallenge>> {
        let row = sqlx::query_as::<_, ChallengeRow>(
            r#"
            SELECT phone, code, user_name, password_hash, created_at, expires_at
            FROM phone_challenges
            WHERE phone = $1
            "#,
        )
        .bind(phone.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_challenge()).transpose()
    }

    async fn delete(&self, phone: &PhoneNumber) -> IdentityResult<()> {
        sqlx::query("DELETE FROM phone_challenges WHERE phone = $1")
            .bind(phone.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// Map a unique-index violation to the domain conflict error
///
/// Postgres error code 23505 is unique_violation; which constraint fired
/// decides between the user-name and provider-id conflicts.
fn unique_violation_to_conflict(err: sqlx::Error) -> IdentityError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return if db_err.constraint() == Some("users_provider_id_key") {
                IdentityError::ProviderIdTaken
            } else {
                IdentityError::UserNameTaken
            };
        }
    }
    IdentityError::Database(err)
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    user_name: String,
    provider_id: Option<String>,
    password_hash: Option<String>,
    phone_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> IdentityResult<User> {
        let user_name = UserName::from_db(&self.user_name)
            .map_err(|e| IdentityError::Internal(format!("Invalid user_name: {e}")))?;

        let provider_id = self
            .provider_id
            .map(ProviderId::new)
            .transpose()
            .map_err(|e| IdentityError::Internal(format!("Invalid provider_id: {e}")))?;

        let password_hash = self
            .password_hash
            .map(UserPassword::from_phc_string)
            .transpose()
            .map_err(|e| IdentityError::Internal(format!("Invalid password hash: {e}")))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            user_name,
            provider_id,
            password_hash,
            phone_verified: self.phone_verified,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> Session {
        Session {
            session_id: SessionId::from_uuid(self.session_id),
            user_id: UserId::from_uuid(self.user_id),
            created_at: self.created_at,
            expires_at: self.expires_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ChallengeRow {
    phone: String,
    code: String,
    user_name: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl ChallengeRow {
    fn into_challenge(self) -> IdentityResult<PhoneChallenge> {
        let phone = PhoneNumber::new(&self.phone)
            .map_err(|e| IdentityError::Internal(format!("Invalid phone: {e}")))?;
        let code = OtpCode::new(&self.code)
            .map_err(|e| IdentityError::Internal(format!("Invalid code: {e}")))?;
        let user_name = UserName::from_db(&self.user_name)
            .map_err(|e| IdentityError::Internal(format!("Invalid user_name: {e}")))?;
        let password_hash = UserPassword::from_phc_string(self.password_hash)
            .map_err(|e| IdentityError::Internal(format!("Invalid password hash: {e}")))?;

        Ok(PhoneChallenge {
            phone,
            code,
            user_name,
            password_hash,
            created_at: self.created_at,
            expires_at: self.expires_at,
        })
    }
}
