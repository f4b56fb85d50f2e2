//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; application-level errors flow
//! through `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router, http,
    http::{Method, header},
};
use base64::Engine;
use base64::engine::general_purpose;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use content::PgContentRepository;
use content::content_router;
use identity::infra::google::{GoogleConfig, GoogleProviderVerifier};
use identity::infra::sms::{HttpSmsSender, SmsConfig};
use identity::{GuardState, IdentityConfig, PgIdentityRepository, identity_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,identity=info,content=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let identity_repo = PgIdentityRepository::new(pool.clone());
    let content_repo = PgContentRepository::new(pool.clone());

    // Startup cleanup: remove expired sessions
    // Errors here should not prevent server startup
    match identity::domain::repository::SessionRepository::cleanup_expired(&identity_repo).await {
        Ok(sessions) => {
            tracing::info!(sessions_deleted = sessions, "Session cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Session cleanup failed, continuing anyway");
        }
    }

    // Identity configuration
    let identity_config = if cfg!(debug_assertions) {
        IdentityConfig::development()
    } else {
        // In production, load secret from environment
        let secret_b64 =
            env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in production");
        let secret = decode_session_secret(&secret_b64)?;
        IdentityConfig {
            session_secret: secret,
            password_pepper: env::var("PASSWORD_PEPPER").ok(),
            ..IdentityConfig::default()
        }
    };

    let google = GoogleProviderVerifier::new(GoogleConfig {
        client_id: env::var("GOOGLE_CLIENT_ID").unwrap_or_default(),
        client_secret: env::var("GOOGLE_CLIENT_SECRET").unwrap_or_default(),
        redirect_uri: env::var("GOOGLE_REDIRECT_URI")
            .unwrap_or_else(|_| "http://localhost:3000/auth/google/success".to_string()),
    });

    let sms = HttpSmsSender::new(SmsConfig {
        api_url: env::var("SMS_API_URL").unwrap_or_default(),
        api_key: env::var("SMS_API_KEY").unwrap_or_default(),
    });

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173,http://127.0.0.1:5173".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Route guard for content routes
    let guard_state = GuardState {
        repo: Arc::new(identity_repo.clone()),
        config: Arc::new(identity_config.clone()),
    };
    let guarded_content = content_router(content_repo).layer(
        axum::middleware::from_fn_with_state(
            guard_state,
            identity::require_session::<PgIdentityRepository>,
        ),
    );

    // Build router
    let app = Router::new()
        .merge(identity_router(identity_repo, google, sms, identity_config))
        .merge(guarded_content)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let addr: SocketAddr = bind_addr.parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Decode the base64 session secret, rejecting anything but 32 bytes
fn decode_session_secret(secret_b64: &str) -> anyhow::Result<[u8; 32]> {
    let secret_bytes = Engine::decode(&general_purpose::STANDARD, secret_b64)?;
    secret_bytes.as_slice().try_into().map_err(|_| {
        anyhow::anyhow!(
            "SESSION_SECRET must decode to exactly 32 bytes, got {}",
            secret_bytes.len()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_secret_accepts_32_bytes() {
        let b64 = general_purpose::STANDARD.encode([7u8; 32]);
        assert_eq!(decode_session_secret(&b64).unwrap(), [7u8; 32]);
    }

    #[test]
    fn test_session_secret_rejects_wrong_length() {
        let b64 = general_purpose::STANDARD.encode([7u8; 16]);
        let err = decode_session_secret(&b64).unwrap_err();
        assert!(err.to_string().contains("32 bytes"));
    }

    #[test]
    fn test_session_secret_rejects_bad_base64() {
        assert!(decode_session_secret("not base64!!!").is_err());
    }
}
