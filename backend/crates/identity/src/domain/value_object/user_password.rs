//! User Password Value Object
//!
//! Thin wrappers around the platform password primitives so the rest of
//! the identity crate only deals in domain types. `RawPassword` holds the
//! clear text for the duration of a request (zeroized on drop through the
//! inner type); `UserPassword` holds the Argon2id PHC string.

use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};

/// Clear-text password as submitted by the user
///
/// Validated against the password policy at construction.
#[derive(Debug)]
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate and wrap a submitted password
    pub fn new(input: impl Into<String>) -> Result<Self, PasswordPolicyError> {
        Ok(Self(ClearTextPassword::new(input.into())?))
    }

    /// Hash with Argon2id, mixing in the optional server pepper
    pub fn hash(&self, pepper: Option<&str>) -> Result<UserPassword, PasswordHashError> {
        Ok(UserPassword(self.0.hash(pepper.map(str::as_bytes))?))
    }

    /// Verify against a stored hash
    pub fn verify(&self, stored: &UserPassword, pepper: Option<&str>) -> bool {
        stored.0.verify(&self.0, pepper.map(str::as_bytes))
    }
}

/// Argon2id password hash in PHC string format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Reconstruct from a stored PHC string
    pub fn from_phc_string(phc: impl Into<String>) -> Result<Self, PasswordHashError> {
        Ok(Self(HashedPassword::from_phc_string(phc)?))
    }

    /// The PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_rejects_short() {
        assert!(RawPassword::new("short").is_err());
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("correct horse battery").unwrap();
        let hashed = raw.hash(None).unwrap();
        assert!(raw.verify(&hashed, None));

        let other = RawPassword::new("wrong horse battery").unwrap();
        assert!(!other.verify(&hashed, None));
    }

    #[test]
    fn test_pepper_changes_verification() {
        let raw = RawPassword::new("correct horse battery").unwrap();
        let hashed = raw.hash(Some("pepper")).unwrap();
        assert!(raw.verify(&hashed, Some("pepper")));
        assert!(!raw.verify(&hashed, None));
    }

    #[test]
    fn test_phc_roundtrip() {
        let raw = RawPassword::new("correct horse battery").unwrap();
        let hashed = raw.hash(None).unwrap();
        let restored = UserPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(raw.verify(&restored, None));
    }
}
