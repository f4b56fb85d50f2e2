//! HTTP Handlers
//!
//! Success paths for browser-driven flows answer with 303 redirects;
//! failures surface as problem JSON through `IdentityError`.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Redirect};
use std::sync::Arc;

use platform::cookie::CookieConfig;

use crate::application::config::IdentityConfig;
use crate::application::{
    AuthenticateUseCase, CredentialProof, RegisterUseCase, SignOutUseCase,
    StartPhoneRegistration, VerifyPhoneChallenge,
};
use crate::application::phone_registration::{StartPhoneInput, VerifyPhoneInput};
use crate::application::register::RegisterInput;
use crate::domain::gateway::{ChallengeSender, ProviderVerifier};
use crate::domain::repository::{ChallengeRepository, SessionRepository, UserRepository};
use crate::error::{IdentityError, IdentityResult};
use crate::presentation::dto::{
    FormDescriptor, LoginRequest, OAuthCallbackQuery, RegisterRequest, SendOtpRequest,
    VerifyOtpRequest, VerifyOtpResponse,
};

/// Shared state for identity handlers
#[derive(Clone)]
pub struct IdentityAppState<R, P, D>
where
    R: UserRepository + SessionRepository + ChallengeRepository + Clone + Send + Sync + 'static,
    P: ProviderVerifier + Clone + Send + Sync + 'static,
    D: ChallengeSender + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub provider: Arc<P>,
    pub sender: Arc<D>,
    pub config: Arc<IdentityConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// GET /register
pub async fn register_form() -> Json<FormDescriptor> {
    Json(FormDescriptor {
        action: "/register",
        method: "POST",
        fields: &["userName", "password"],
    })
}

/// POST /register
pub async fn register<R, P, D>(
    State(state): State<IdentityAppState<R, P, D>>,
    Json(req): Json<RegisterRequest>,
) -> IdentityResult<Redirect>
where
    R: UserRepository + SessionRepository + ChallengeRepository + Clone + Send + Sync + 'static,
    P: ProviderVerifier + Clone + Send + Sync + 'static,
    D: ChallengeSender + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    use_case
        .execute(RegisterInput {
            user_name: req.user_name,
            password: req.password,
        })
        .await?;

    Ok(Redirect::to("/login"))
}

// ============================================================================
// Login
// ============================================================================

/// GET /login
pub async fn login_form() -> Json<FormDescriptor> {
    Json(FormDescriptor {
        action: "/login",
        method: "POST",
        fields: &["userName", "password"],
    })
}

/// POST /login
pub async fn login<R, P, D>(
    State(state): State<IdentityAppState<R, P, D>>,
    Json(req): Json<LoginRequest>,
) -> IdentityResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + ChallengeRepository + Clone + Send + Sync + 'static,
    P: ProviderVerifier + Clone + Send + Sync + 'static,
    D: ChallengeSender + Clone + Send + Sync + 'static,
{
    let use_case =
        AuthenticateUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(CredentialProof::Local {
            user_name: req.user_name,
            password: req.password,
        })
        .await?;

    let cookie = session_cookie_config(&state.config).build_set_cookie(&output.session_token);

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/compose")))
}

// ============================================================================
// Google OAuth
// ============================================================================

/// GET /auth/google
pub async fn google_redirect<R, P, D>(
    State(state): State<IdentityAppState<R, P, D>>,
) -> Redirect
where
    R: UserRepository + SessionRepository + ChallengeRepository + Clone + Send + Sync + 'static,
    P: ProviderVerifier + Clone + Send + Sync + 'static,
    D: ChallengeSender + Clone + Send + Sync + 'static,
{
    Redirect::to(&state.provider.authorize_url())
}

/// GET /auth/google/success
///
/// Callback from the provider. Exchanges the code, finds or creates the
/// account, and establishes a session just like a local login.
pub async fn google_callback<R, P, D>(
    State(state): State<IdentityAppState<R, P, D>>,
    Query(query): Query<OAuthCallbackQuery>,
) -> IdentityResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + ChallengeRepository + Clone + Send + Sync + 'static,
    P: ProviderVerifier + Clone + Send + Sync + 'static,
    D: ChallengeSender + Clone + Send + Sync + 'static,
{
    if let Some(error) = query.error {
        return Err(IdentityError::Provider(format!(
            "Consent was not granted: {error}"
        )));
    }

    let code = query
        .code
        .ok_or_else(|| IdentityError::Validation("Missing authorization code".to_string()))?;

    let profile = state.provider.exchange(&code).await?;

    let use_case =
        AuthenticateUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let output = use_case.execute(CredentialProof::Provider(profile)).await?;

    let cookie = session_cookie_config(&state.config).build_set_cookie(&output.session_token);

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/compose")))
}

// ============================================================================
// Phone Registration
// ============================================================================

/// POST /send-otp
pub async fn send_otp<R, P, D>(
    State(state): State<IdentityAppState<R, P, D>>,
    Json(req): Json<SendOtpRequest>,
) -> IdentityResult<Redirect>
where
    R: UserRepository + SessionRepository + ChallengeRepository + Clone + Send + Sync + 'static,
    P: ProviderVerifier + Clone + Send + Sync + 'static,
    D: ChallengeSender + Clone + Send + Sync + 'static,
{
    let use_case = StartPhoneRegistration::new(
        state.repo.clone(),
        state.repo.clone(),
        state.sender.clone(),
        state.config.clone(),
    );

    use_case
        .execute(StartPhoneInput {
            phone: req.phone,
            user_name: req.user_name,
            password: req.password,
        })
        .await?;

    Ok(Redirect::to("/verify-otp"))
}

/// POST /verify-otp
pub async fn verify_otp<R, P, D>(
    State(state): State<IdentityAppState<R, P, D>>,
    Json(req): Json<VerifyOtpRequest>,
) -> IdentityResult<Json<VerifyOtpResponse>>
where
    R: UserRepository + SessionRepository + ChallengeRepository + Clone + Send + Sync + 'static,
    P: ProviderVerifier + Clone + Send + Sync + 'static,
    D: ChallengeSender + Clone + Send + Sync + 'static,
{
    let use_case = VerifyPhoneChallenge::new(state.repo.clone(), state.repo.clone());

    let output = use_case
        .execute(VerifyPhoneInput {
            phone: req.phone,
            code: req.code,
        })
        .await?;

    Ok(Json(VerifyOtpResponse {
        user_name: output.user_name,
        registered: true,
    }))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /logout
pub async fn logout<R, P, D>(
    State(state): State<IdentityAppState<R, P, D>>,
    headers: HeaderMap,
) -> IdentityResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + ChallengeRepository + Clone + Send + Sync + 'static,
    P: ProviderVerifier + Clone + Send + Sync + 'static,
    D: ChallengeSender + Clone + Send + Sync + 'static,
{
    if let Some(token) =
        platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name)
    {
        SignOutUseCase::new(state.repo.clone(), state.config.clone())
            .execute(&token)
            .await?;
    }

    let cookie = session_cookie_config(&state.config).build_delete_cookie();

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/login")))
}

// ============================================================================
// Helpers
// ============================================================================

/// Session cookie settings derived from the identity config
pub fn session_cookie_config(config: &IdentityConfig) -> CookieConfig {
    CookieConfig::session(
        &config.session_cookie_name,
        config.cookie_secure,
        config.cookie_same_site,
        config.session_ttl_secs(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_shape() {
        let config = IdentityConfig::default();
        let cookie = session_cookie_config(&config).build_set_cookie("token123");
        assert!(cookie.starts_with("session=token123"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("Max-Age=2592000"));
    }

    #[test]
    fn test_development_cookie_not_secure() {
        let config = IdentityConfig::development();
        let cookie = session_cookie_config(&config).build_set_cookie("token123");
        assert!(!cookie.contains("Secure"));
    }
}
