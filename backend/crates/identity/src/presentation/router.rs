//! Identity Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::domain::gateway::{ChallengeSender, ProviderVerifier};
use crate::domain::repository::{ChallengeRepository, SessionRepository, UserRepository};
use crate::infra::google::GoogleProviderVerifier;
use crate::infra::postgres::PgIdentityRepository;
use crate::infra::sms::HttpSmsSender;
use crate::presentation::handlers::{self, IdentityAppState};

/// Create the identity router with the production adapters
pub fn identity_router(
    repo: PgIdentityRepository,
    provider: GoogleProviderVerifier,
    sender: HttpSmsSender,
    config: IdentityConfig,
) -> Router {
    identity_router_generic(repo, provider, sender, config)
}

/// Create the identity router for any set of implementations
pub fn identity_router_generic<R, P, D>(
    repo: R,
    provider: P,
    sender: D,
    config: IdentityConfig,
) -> Router
where
    R: UserRepository + SessionRepository + ChallengeRepository + Clone + Send + Sync + 'static,
    P: ProviderVerifier + Clone + Send + Sync + 'static,
    D: ChallengeSender + Clone + Send + Sync + 'static,
{
    let state = IdentityAppState {
        repo: Arc::new(repo),
        provider: Arc::new(provider),
        sender: Arc::new(sender),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/register",
            get(handlers::register_form).post(handlers::register::<R, P, D>),
        )
        .route(
            "/login",
            get(handlers::login_form).post(handlers::login::<R, P, D>),
        )
        .route("/auth/google", get(handlers::google_redirect::<R, P, D>))
        .route(
            "/auth/google/success",
            get(handlers::google_callback::<R, P, D>),
        )
        .route("/send-otp", post(handlers::send_otp::<R, P, D>))
        .route("/verify-otp", post(handlers::verify_otp::<R, P, D>))
        .route("/logout", post(handlers::logout::<R, P, D>))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateway::ProviderProfile;
    use crate::domain::value_object::ProviderId;
    use crate::error::IdentityResult;
    use crate::infra::memory::MemoryIdentityRepository;
    use crate::infra::sms::LogSender;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    #[derive(Clone)]
    struct StaticProvider;

    impl ProviderVerifier for StaticProvider {
        fn authorize_url(&self) -> String {
            "https://provider.example/consent".to_string()
        }

        async fn exchange(&self, _code: &str) -> IdentityResult<ProviderProfile> {
            Ok(ProviderProfile {
                subject: ProviderId::new("sub-1").unwrap(),
                display_name: Some("Alice".to_string()),
            })
        }
    }

    fn app() -> Router {
        identity_router_generic(
            MemoryIdentityRepository::new(),
            StaticProvider,
            LogSender,
            IdentityConfig::development(),
        )
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_login_unknown_user_answers_unauthorized() {
        let response = app()
            .oneshot(post_json(
                "/login",
                json!({"userName": "ghost", "password": "password123"}),
            ))
            .await
            .unwrap();

        // Problem JSON 401, never 404: the response must not reveal
        // whether the user name exists
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = axum::body::to_bytes(response.into_body(), 4096).await.unwrap();
        let problem: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(problem["status"], 401);
        assert_eq!(problem["title"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_register_then_login_sets_cookie() {
        let app = app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/register",
                json!({"userName": "alice", "password": "password123"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = app
            .oneshot(post_json(
                "/login",
                json!({"userName": "alice", "password": "password123"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/compose"
        );
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(cookie.starts_with("session="));
        assert!(cookie.contains("HttpOnly"));
    }
}
