//! Content Router
//!
//! The router carries only the content routes; the caller layers the
//! identity route guard on top so every route here requires a session.

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::domain::repository::PostRepository;
use crate::infra::postgres::PgContentRepository;
use crate::presentation::handlers::{self, ContentAppState};

/// Create the content router with the PostgreSQL repository
pub fn content_router(repo: PgContentRepository) -> Router {
    content_router_generic(repo)
}

/// Create the content router for any repository implementation
pub fn content_router_generic<P>(repo: P) -> Router
where
    P: PostRepository + Clone + Send + Sync + 'static,
{
    let state = ContentAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route(
            "/compose",
            get(handlers::compose_form).post(handlers::compose::<P>),
        )
        .route("/blogs", get(handlers::blogs::<P>))
        .route("/delete/{id}", get(handlers::delete::<P>))
        .with_state(state)
}
