//! External Collaborator Traits
//!
//! Interfaces for the OAuth provider and the challenge delivery channel.
//! Implementations live in the infrastructure layer; use cases depend on
//! these traits only, so tests can substitute in-memory fakes.

use crate::domain::value_object::{OtpCode, PhoneNumber, ProviderId};
use crate::error::IdentityResult;

/// Profile returned by a successful provider exchange
#[derive(Debug, Clone)]
pub struct ProviderProfile {
    /// Stable subject identifier (Google `sub`)
    pub subject: ProviderId,

    /// Human-readable name from the provider, if any
    pub display_name: Option<String>,
}

/// OAuth authorization-code flow against an external provider
#[trait_variant::make(ProviderVerifier: Send)]
pub trait LocalProviderVerifier {
    /// The URL to redirect the user's browser to for consent
    fn authorize_url(&self) -> String;

    /// Exchange an authorization code for the user's profile
    async fn exchange(&self, code: &str) -> IdentityResult<ProviderProfile>;
}

/// Delivery channel for one-time codes
#[trait_variant::make(ChallengeSender: Send)]
pub trait LocalChallengeSender {
    /// Send the code to the phone number
    async fn send(&self, phone: &PhoneNumber, code: &OtpCode) -> IdentityResult<()>;
}
