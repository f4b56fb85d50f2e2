//! Delete Post Use Case
//!
//! Any authenticated user may delete any post; there is no per-post
//! ownership. Deleting a missing id succeeds with zero rows removed.

use std::sync::Arc;

use crate::domain::repository::PostRepository;
use crate::error::ContentResult;
use kernel::id::PostId;

/// Delete post use case
pub struct DeletePostUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> DeletePostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    pub async fn execute(&self, post_id: &PostId) -> ContentResult<()> {
        let deleted = self.post_repo.delete_by_id(post_id).await?;

        if deleted == 0 {
            tracing::debug!(post_id = %post_id, "Delete matched no post");
        } else {
            tracing::info!(post_id = %post_id, "Post deleted");
        }

        Ok(())
    }
}
