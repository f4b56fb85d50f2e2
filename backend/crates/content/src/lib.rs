//! Content Backend Module
//!
//! Post composition, listing, and deletion, layered the same way as the
//! identity crate:
//! - `domain/` - Post entity, value objects, repository trait
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! All routes here sit behind the identity route guard; handlers read
//! the authenticated user from request extensions.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use error::{ContentError, ContentResult};
pub use infra::memory::MemoryContentRepository;
pub use infra::postgres::PgContentRepository;
pub use presentation::router::{content_router, content_router_generic};
