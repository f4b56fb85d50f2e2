//! API DTOs (Data Transfer Objects)

use crate::domain::entity::{Post, PostListing};
use serde::{Deserialize, Serialize};

/// Compose request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeRequest {
    pub title: String,
    pub body: String,
}

/// A post as rendered to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    pub post_id: String,
    pub author_name: String,
    pub title: String,
    pub body: String,
    pub created_at: String,
    pub updated_at: String,
}

impl PostDto {
    pub fn from_post(post: &Post) -> Self {
        Self {
            post_id: post.post_id.to_string(),
            author_name: post.author_name.clone(),
            title: post.title.as_str().to_string(),
            body: post.body.as_str().to_string(),
            created_at: post.created_at.to_rfc3339(),
            updated_at: post.updated_at.to_rfc3339(),
        }
    }
}

/// Listing response with an explicit empty marker
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "posts")]
pub enum PostListResponse {
    Empty,
    Posts(Vec<PostDto>),
}

impl PostListResponse {
    pub fn from_listing(listing: &PostListing) -> Self {
        match listing {
            PostListing::Empty => Self::Empty,
            PostListing::Posts(posts) => {
                Self::Posts(posts.iter().map(PostDto::from_post).collect())
            }
        }
    }
}
