//! Random generation utilities
//!
//! Small helpers for generating secrets and one-time codes.

use rand::Rng;
use rand::rngs::OsRng;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill(&mut bytes[..]);
    bytes
}

/// Generate a random numeric code of the given number of digits
///
/// Leading zeros are allowed, so a 6-digit code covers "000000".."999999".
pub fn random_numeric_code(digits: usize) -> String {
    let mut code = String::with_capacity(digits);
    for _ in 0..digits {
        let d: u8 = OsRng.gen_range(0..10);
        code.push(char::from(b'0' + d));
    }
    code
}
