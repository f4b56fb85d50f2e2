//! In-Memory Repository Implementation
//!
//! Insertion-ordered vector behind a `tokio::sync::RwLock`; the lock is
//! the synchronization the shared store needs under concurrent handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::Post;
use crate::domain::repository::PostRepository;
use crate::error::ContentResult;
use kernel::id::PostId;

/// In-memory post repository
#[derive(Clone, Default)]
pub struct MemoryContentRepository {
    posts: Arc<RwLock<Vec<Post>>>,
}

impl MemoryContentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PostRepository for MemoryContentRepository {
    async fn insert(&self, post: &Post) -> ContentResult<()> {
        let mut posts = self.posts.write().await;
        posts.push(post.clone());
        Ok(())
    }

    async fn list(&self) -> ContentResult<Vec<Post>> {
        let posts = self.posts.read().await;
        Ok(posts.clone())
    }

    async fn delete_by_id(&self, post_id: &PostId) -> ContentResult<u64> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.post_id != *post_id);
        Ok((before - posts.len()) as u64)
    }
}
