//! Provider Id Value Object
//!
//! The stable subject identifier an OAuth provider assigns to a user
//! (Google's `sub` claim). Opaque to us; the only invariant is that it
//! is non-empty.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error returned when a provider id is empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyProviderId;

impl fmt::Display for EmptyProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Provider id cannot be empty")
    }
}

impl std::error::Error for EmptyProviderId {}

/// Stable subject identifier from an OAuth provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderId(String);

impl ProviderId {
    /// Wrap a provider subject, rejecting empty input
    pub fn new(input: impl Into<String>) -> Result<Self, EmptyProviderId> {
        let value = input.into();
        if value.trim().is_empty() {
            return Err(EmptyProviderId);
        }
        Ok(Self(value))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProviderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProviderId {
    type Error = EmptyProviderId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProviderId> for String {
    fn from(id: ProviderId) -> Self {
        id.0
    }
}
