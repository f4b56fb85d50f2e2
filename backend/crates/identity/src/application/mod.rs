//! Identity Application Layer
//!
//! Use cases orchestrating the domain. Each use case is generic over the
//! repository and gateway traits it needs, held behind `Arc`.

pub mod authenticate;
pub mod check_session;
pub mod config;
pub mod phone_registration;
pub mod register;
pub mod sign_out;
pub mod token;

pub use authenticate::{AuthenticateOutput, AuthenticateUseCase, CredentialProof};
pub use check_session::ResolveSessionUseCase;
pub use config::IdentityConfig;
pub use phone_registration::{StartPhoneRegistration, VerifyPhoneChallenge};
pub use register::RegisterUseCase;
pub use sign_out::SignOutUseCase;
