//! Post Value Objects
//!
//! Length floors come from the product rules: a title is at least 20
//! characters, a body at least 100, both counted after trimming.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum title length (in characters, after trim)
pub const TITLE_MIN_LENGTH: usize = 20;

/// Minimum body length (in characters, after trim)
pub const BODY_MIN_LENGTH: usize = 100;

/// Error returned when post content fails validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostContentError {
    /// Title below the minimum length
    TitleTooShort { length: usize, min: usize },

    /// Body below the minimum length
    BodyTooShort { length: usize, min: usize },
}

impl fmt::Display for PostContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TitleTooShort { length, min } => {
                write!(f, "Title is too short ({length} chars, minimum {min})")
            }
            Self::BodyTooShort { length, min } => {
                write!(f, "Body is too short ({length} chars, minimum {min})")
            }
        }
    }
}

impl std::error::Error for PostContentError {}

/// Validated post title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostTitle(String);

impl PostTitle {
    pub fn new(input: impl AsRef<str>) -> Result<Self, PostContentError> {
        let trimmed = input.as_ref().trim();
        let length = trimmed.chars().count();
        if length < TITLE_MIN_LENGTH {
            return Err(PostContentError::TitleTooShort {
                length,
                min: TITLE_MIN_LENGTH,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PostTitle {
    type Error = PostContentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PostTitle> for String {
    fn from(title: PostTitle) -> Self {
        title.0
    }
}

/// Validated post body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostBody(String);

impl PostBody {
    pub fn new(input: impl AsRef<str>) -> Result<Self, PostContentError> {
        let trimmed = input.as_ref().trim();
        let length = trimmed.chars().count();
        if length < BODY_MIN_LENGTH {
            return Err(PostContentError::BodyTooShort {
                length,
                min: BODY_MIN_LENGTH,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PostBody {
    type Error = PostContentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PostBody> for String {
    fn from(body: PostBody) -> Self {
        body.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_at_minimum_ok() {
        let title = PostTitle::new("a".repeat(TITLE_MIN_LENGTH)).unwrap();
        assert_eq!(title.as_str().len(), TITLE_MIN_LENGTH);
    }

    #[test]
    fn test_title_below_minimum_fails() {
        assert!(matches!(
            PostTitle::new("a".repeat(TITLE_MIN_LENGTH - 1)),
            Err(PostContentError::TitleTooShort { length: 19, min: 20 })
        ));
    }

    #[test]
    fn test_title_trimmed_before_counting() {
        // 19 characters padded with whitespace still fails
        let padded = format!("  {}  ", "a".repeat(19));
        assert!(PostTitle::new(padded).is_err());
    }

    #[test]
    fn test_body_at_minimum_ok() {
        assert!(PostBody::new("b".repeat(BODY_MIN_LENGTH)).is_ok());
    }

    #[test]
    fn test_body_below_minimum_fails() {
        assert!(matches!(
            PostBody::new("b".repeat(BODY_MIN_LENGTH - 1)),
            Err(PostContentError::BodyTooShort { length: 99, min: 100 })
        ));
    }

    #[test]
    fn test_multibyte_counted_as_chars() {
        // 20 multibyte characters pass even though byte length is larger
        assert!(PostTitle::new("あ".repeat(20)).is_ok());
    }
}
