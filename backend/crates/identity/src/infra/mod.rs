//! Identity Infrastructure Layer

pub mod google;
pub mod memory;
pub mod postgres;
pub mod sms;

pub use google::{GoogleConfig, GoogleProviderVerifier};
pub use memory::MemoryIdentityRepository;
pub use postgres::PgIdentityRepository;
pub use sms::{HttpSmsSender, LogSender, SmsConfig};
