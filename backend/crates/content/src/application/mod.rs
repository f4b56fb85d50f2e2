//! Content Application Layer

pub mod compose_post;
pub mod delete_post;
pub mod list_posts;

pub use compose_post::ComposePostUseCase;
pub use delete_post::DeletePostUseCase;
pub use list_posts::ListPostsUseCase;
