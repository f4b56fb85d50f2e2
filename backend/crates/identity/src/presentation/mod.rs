//! Identity Presentation Layer

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::IdentityAppState;
pub use middleware::{CurrentUser, GuardState, require_session};
pub use router::{identity_router, identity_router_generic};
