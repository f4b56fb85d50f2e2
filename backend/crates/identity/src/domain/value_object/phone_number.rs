//! Phone Number Value Object
//!
//! Normalized phone number used as the key for pending phone challenges.
//!
//! ## Invariants
//! - 8 to 15 digits after stripping spaces, hyphens, and parentheses
//! - An optional leading `+` is preserved
//! - No other characters allowed

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum number of digits in a phone number
pub const PHONE_MIN_DIGITS: usize = 8;

/// Maximum number of digits in a phone number (E.164 limit)
pub const PHONE_MAX_DIGITS: usize = 15;

/// Error returned when phone number validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneNumberError {
    /// Phone number is empty after normalization
    Empty,

    /// Too few digits
    TooShort { digits: usize, min: usize },

    /// Too many digits
    TooLong { digits: usize, max: usize },

    /// Contains a character that is not a digit or separator
    InvalidCharacter { char: char },
}

impl fmt::Display for PhoneNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Phone number cannot be empty"),
            Self::TooShort { digits, min } => {
                write!(f, "Phone number is too short ({digits} digits, minimum {min})")
            }
            Self::TooLong { digits, max } => {
                write!(f, "Phone number is too long ({digits} digits, maximum {max})")
            }
            Self::InvalidCharacter { char } => {
                write!(f, "Invalid character '{char}' in phone number")
            }
        }
    }
}

impl std::error::Error for PhoneNumberError {}

/// Validated, normalized phone number
///
/// Stored as `+<digits>` or `<digits>` with all separators removed.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Normalize and validate a phone number
    pub fn new(input: impl AsRef<str>) -> Result<Self, PhoneNumberError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PhoneNumberError::Empty);
        }

        let mut normalized = String::with_capacity(trimmed.len());
        for (pos, ch) in trimmed.chars().enumerate() {
            match ch {
                '+' if pos == 0 => normalized.push('+'),
                '0'..='9' => normalized.push(ch),
                ' ' | '-' | '(' | ')' => {}
                other => return Err(PhoneNumberError::InvalidCharacter { char: other }),
            }
        }

        let digits = normalized.chars().filter(char::is_ascii_digit).count();
        if digits < PHONE_MIN_DIGITS {
            return Err(PhoneNumberError::TooShort {
                digits,
                min: PHONE_MIN_DIGITS,
            });
        }
        if digits > PHONE_MAX_DIGITS {
            return Err(PhoneNumberError::TooLong {
                digits,
                max: PHONE_MAX_DIGITS,
            });
        }

        Ok(Self(normalized))
    }

    /// The normalized phone number
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Mask all but the last two digits in debug output
        let visible = self.0.len().saturating_sub(2);
        write!(f, "PhoneNumber(\"{}{}\")", "*".repeat(visible), &self.0[visible..])
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = PhoneNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_digits() {
        let phone = PhoneNumber::new("09012345678").unwrap();
        assert_eq!(phone.as_str(), "09012345678");
    }

    #[test]
    fn test_international_with_separators() {
        let phone = PhoneNumber::new("+81 (90) 1234-5678").unwrap();
        assert_eq!(phone.as_str(), "+819012345678");
    }

    #[test]
    fn test_empty_fails() {
        assert!(matches!(PhoneNumber::new("  "), Err(PhoneNumberError::Empty)));
    }

    #[test]
    fn test_too_short() {
        assert!(matches!(
            PhoneNumber::new("1234567"),
            Err(PhoneNumberError::TooShort { digits: 7, min: 8 })
        ));
    }

    #[test]
    fn test_too_long() {
        assert!(matches!(
            PhoneNumber::new("1234567890123456"),
            Err(PhoneNumberError::TooLong { .. })
        ));
    }

    #[test]
    fn test_letters_fail() {
        assert!(matches!(
            PhoneNumber::new("0901234abcd"),
            Err(PhoneNumberError::InvalidCharacter { char: 'a' })
        ));
    }

    #[test]
    fn test_plus_in_middle_fails() {
        assert!(matches!(
            PhoneNumber::new("090+12345678"),
            Err(PhoneNumberError::InvalidCharacter { char: '+' })
        ));
    }

    #[test]
    fn test_debug_masks_digits() {
        let phone = PhoneNumber::new("09012345678").unwrap();
        let debug = format!("{phone:?}");
        assert!(debug.contains("78"));
        assert!(!debug.contains("090123"));
    }
}
