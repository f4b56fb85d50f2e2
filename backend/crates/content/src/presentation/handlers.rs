//! HTTP Handlers
//!
//! All content routes run behind the identity route guard, which leaves
//! `CurrentUser` in the request extensions. Mutating flows answer with
//! 303 redirects like the rest of the application.

use axum::Extension;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::Redirect;
use std::sync::Arc;
use uuid::Uuid;

use identity::CurrentUser;
use kernel::id::PostId;

use crate::application::{ComposePostUseCase, DeletePostUseCase, ListPostsUseCase};
use crate::application::compose_post::ComposeInput;
use crate::domain::repository::PostRepository;
use crate::error::ContentResult;
use crate::presentation::dto::{ComposeRequest, PostListResponse};
use identity::presentation::dto::FormDescriptor;

/// Shared state for content handlers
#[derive(Clone)]
pub struct ContentAppState<P>
where
    P: PostRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<P>,
}

/// GET /compose
pub async fn compose_form() -> Json<FormDescriptor> {
    Json(FormDescriptor {
        action: "/compose",
        method: "POST",
        fields: &["title", "body"],
    })
}

/// POST /compose
pub async fn compose<P>(
    State(state): State<ContentAppState<P>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(req): Json<ComposeRequest>,
) -> ContentResult<Redirect>
where
    P: PostRepository + Clone + Send + Sync + 'static,
{
    let use_case = ComposePostUseCase::new(state.repo.clone());

    use_case
        .execute(ComposeInput {
            author_id: current_user.user_id,
            author_name: current_user.user_name,
            title: req.title,
            body: req.body,
        })
        .await?;

    Ok(Redirect::to("/blogs"))
}

/// GET /blogs
pub async fn blogs<P>(
    State(state): State<ContentAppState<P>>,
) -> ContentResult<Json<PostListResponse>>
where
    P: PostRepository + Clone + Send + Sync + 'static,
{
    let listing = ListPostsUseCase::new(state.repo.clone()).execute().await?;
    Ok(Json(PostListResponse::from_listing(&listing)))
}

/// GET /delete/{id}
///
/// Always redirects to /blogs; a missing id and a removed post look the
/// same to the caller.
pub async fn delete<P>(
    State(state): State<ContentAppState<P>>,
    Path(id): Path<Uuid>,
) -> ContentResult<Redirect>
where
    P: PostRepository + Clone + Send + Sync + 'static,
{
    DeletePostUseCase::new(state.repo.clone())
        .execute(&PostId::from_uuid(id))
        .await?;

    Ok(Redirect::to("/blogs"))
}
