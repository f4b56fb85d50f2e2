//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::Post;
use crate::error::ContentResult;
use kernel::id::PostId;

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// Persist a new post
    async fn insert(&self, post: &Post) -> ContentResult<()>;

    /// All posts in natural storage order
    async fn list(&self) -> ContentResult<Vec<Post>>;

    /// Delete by id, returning the number of rows removed
    ///
    /// Zero rows is not an error; deleting a missing id and deleting an
    /// existing one are indistinguishable to the caller.
    async fn delete_by_id(&self, post_id: &PostId) -> ContentResult<u64>;
}
