//! Route Guard Middleware
//!
//! Protects content routes. A request with a live session passes through
//! with `CurrentUser` inserted into its extensions; anything else is
//! redirected to /login instead of erroring, so an anonymous browser
//! lands on the login page.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;

use crate::application::ResolveSessionUseCase;
use crate::application::config::IdentityConfig;
use crate::domain::repository::{SessionRepository, UserRepository};

/// Route guard state
#[derive(Clone)]
pub struct GuardState<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<IdentityConfig>,
}

/// The authenticated user, inserted into request extensions by the guard
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: kernel::id::UserId,
    pub user_name: String,
}

/// Middleware that requires a valid session, redirecting to /login otherwise
pub async fn require_session<R>(
    State(state): State<GuardState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let token =
        platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name);

    let Some(token) = token else {
        return Redirect::to("/login").into_response();
    };

    let use_case =
        ResolveSessionUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    match use_case.execute(&token).await {
        Ok(user) => {
            req.extensions_mut().insert(CurrentUser {
                user_id: user.user_id,
                user_name: user.user_name.original().to_string(),
            });
            next.run(req).await
        }
        Err(_) => Redirect::to("/login").into_response(),
    }
}
