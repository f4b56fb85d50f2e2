//! List Posts Use Case

use std::sync::Arc;

use crate::domain::entity::PostListing;
use crate::domain::repository::PostRepository;
use crate::error::ContentResult;

/// List posts use case
pub struct ListPostsUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> ListPostsUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    pub async fn execute(&self) -> ContentResult<PostListing> {
        let posts = self.post_repo.list().await?;
        Ok(PostListing::from_rows(posts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::compose_post::{ComposeInput, ComposePostUseCase};
    use crate::infra::memory::MemoryContentRepository;
    use kernel::id::UserId;

    #[tokio::test]
    async fn test_empty_store_yields_sentinel() {
        let repo = Arc::new(MemoryContentRepository::new());
        let listing = ListPostsUseCase::new(repo).execute().await.unwrap();
        assert!(listing.is_empty());
    }

    #[tokio::test]
    async fn test_posts_listed_in_insertion_order() {
        let repo = Arc::new(MemoryContentRepository::new());
        let compose = ComposePostUseCase::new(repo.clone());

        for i in 0..3 {
            compose
                .execute(ComposeInput {
                    author_id: UserId::new(),
                    author_name: "alice".to_string(),
                    title: format!("{i}{}", "t".repeat(20)),
                    body: "b".repeat(100),
                })
                .await
                .unwrap();
        }

        let listing = ListPostsUseCase::new(repo).execute().await.unwrap();
        let PostListing::Posts(posts) = listing else {
            panic!("expected posts");
        };
        assert_eq!(posts.len(), 3);
        assert!(posts[0].title.as_str().starts_with('0'));
        assert!(posts[2].title.as_str().starts_with('2'));
    }
}
