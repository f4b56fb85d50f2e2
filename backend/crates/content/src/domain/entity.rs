//! Post Entity

use crate::domain::value_object::{PostBody, PostTitle};
use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};

/// Blog post
#[derive(Debug, Clone)]
pub struct Post {
    pub post_id: PostId,
    pub author_id: UserId,
    pub author_name: String,
    pub title: PostTitle,
    pub body: PostBody,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(author_id: UserId, author_name: String, title: PostTitle, body: PostBody) -> Self {
        let now = Utc::now();
        Self {
            post_id: PostId::new(),
            author_id,
            author_name,
            title,
            body,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Listing result with an explicit empty marker
///
/// An empty store answers with `Empty` rather than a bare empty array,
/// so clients can tell "nothing yet" apart without counting.
#[derive(Debug, Clone)]
pub enum PostListing {
    Empty,
    Posts(Vec<Post>),
}

impl PostListing {
    /// Wrap a query result, collapsing an empty vector to the sentinel
    pub fn from_rows(posts: Vec<Post>) -> Self {
        if posts.is_empty() {
            Self::Empty
        } else {
            Self::Posts(posts)
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Posts(posts) => posts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
