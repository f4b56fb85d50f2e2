//! One-Time Code Value Object
//!
//! Six-digit numeric code sent to a phone number during phone-verified
//! registration. Codes are compared in constant time to avoid leaking
//! digits through timing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of digits in a one-time code
pub const OTP_CODE_LENGTH: usize = 6;

/// Error returned when a one-time code fails validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpCodeError {
    /// Wrong length
    InvalidLength { length: usize },

    /// Contains a non-digit character
    NonNumeric,
}

impl fmt::Display for OtpCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { length } => {
                write!(
                    f,
                    "Code must be exactly {OTP_CODE_LENGTH} digits (got {length})"
                )
            }
            Self::NonNumeric => write!(f, "Code must contain only digits"),
        }
    }
}

impl std::error::Error for OtpCodeError {}

/// Six-digit one-time verification code
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OtpCode(String);

impl OtpCode {
    /// Validate a submitted code
    pub fn new(input: impl AsRef<str>) -> Result<Self, OtpCodeError> {
        let trimmed = input.as_ref().trim();
        let length = trimmed.chars().count();
        if length != OTP_CODE_LENGTH {
            return Err(OtpCodeError::InvalidLength { length });
        }
        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(OtpCodeError::NonNumeric);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Generate a fresh random code
    pub fn generate() -> Self {
        Self(platform::crypto::random_numeric_code(OTP_CODE_LENGTH))
    }

    /// The code digits
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant-time comparison against another code
    pub fn matches(&self, other: &OtpCode) -> bool {
        let a = self.0.as_bytes();
        let b = other.0.as_bytes();
        if a.len() != b.len() {
            return false;
        }
        a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
    }
}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the digits
        write!(f, "OtpCode(\"******\")")
    }
}

impl TryFrom<String> for OtpCode {
    type Error = OtpCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OtpCode> for String {
    fn from(code: OtpCode) -> Self {
        code.0
    }
}
