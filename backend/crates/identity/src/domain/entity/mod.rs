//! Identity Domain Entities

pub mod phone_challenge;
pub mod session;
pub mod user;

pub use phone_challenge::PhoneChallenge;
pub use session::Session;
pub use user::User;
