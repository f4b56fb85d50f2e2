//! Value Objects for the Identity Domain

pub mod otp_code;
pub mod phone_number;
pub mod provider_id;
pub mod user_name;
pub mod user_password;

pub use otp_code::{OtpCode, OtpCodeError};
pub use phone_number::{PhoneNumber, PhoneNumberError};
pub use provider_id::{EmptyProviderId, ProviderId};
pub use user_name::{UserName, UserNameError};
pub use user_password::{RawPassword, UserPassword};
