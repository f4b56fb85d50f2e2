//! Identity Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations and external collaborators
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Local registration and login with user name + password
//! - Google OAuth provider login (account created on first contact)
//! - Phone-verified registration via 6-digit one-time codes
//! - Server-side sessions with HMAC-signed cookie tokens (30-day absolute expiry)
//! - Route guard redirecting anonymous requests to /login
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never stored in clear (including
//!   pending phone challenges, which hold the hash)
//! - Session tokens are HMAC-SHA256 signed session ids; the server holds
//!   all session state and re-fetches the user on every resolve

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::IdentityConfig;
pub use error::{IdentityError, IdentityResult};
pub use infra::memory::MemoryIdentityRepository;
pub use infra::postgres::PgIdentityRepository;
pub use presentation::middleware::{CurrentUser, GuardState, require_session};
pub use presentation::router::{identity_router, identity_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
