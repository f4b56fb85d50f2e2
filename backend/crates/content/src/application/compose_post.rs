//! Compose Post Use Case

use std::sync::Arc;

use crate::domain::entity::Post;
use crate::domain::repository::PostRepository;
use crate::domain::value_object::{PostBody, PostTitle};
use crate::error::{ContentError, ContentResult};
use kernel::id::UserId;

/// Compose input
pub struct ComposeInput {
    pub author_id: UserId,
    pub author_name: String,
    pub title: String,
    pub body: String,
}

/// Compose post use case
pub struct ComposePostUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> ComposePostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    pub async fn execute(&self, input: ComposeInput) -> ContentResult<Post> {
        let title =
            PostTitle::new(&input.title).map_err(|e| ContentError::Validation(e.to_string()))?;
        let body =
            PostBody::new(&input.body).map_err(|e| ContentError::Validation(e.to_string()))?;

        let post = Post::new(input.author_id, input.author_name, title, body);
        self.post_repo.insert(&post).await?;

        tracing::info!(post_id = %post.post_id, author_id = %post.author_id, "Post created");

        Ok(post)
    }
}
