//! Session Token Signing
//!
//! Session tokens are `<session_id>.<signature>` where the signature is
//! HMAC-SHA256 over the session id string, base64url-encoded without
//! padding. The token carries no claims; the session id only makes sense
//! against the server-side session store.

use crate::error::{IdentityError, IdentityResult};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use kernel::id::SessionId;
use sha2::Sha256;
use uuid::Uuid;

/// Generate a signed session token for the session id
pub fn generate_session_token(session_id: SessionId, secret: &[u8; 32]) -> String {
    let session_id = session_id.to_string();

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!("{}.{}", session_id, URL_SAFE_NO_PAD.encode(signature))
}

/// Parse and verify a session token, returning the session id
///
/// Rejects malformed tokens and bad signatures with `SessionInvalid`;
/// no detail is leaked about which check failed.
pub fn parse_session_token(token: &str, secret: &[u8; 32]) -> IdentityResult<SessionId> {
    let (session_id_str, signature_b64) = token
        .split_once('.')
        .ok_or(IdentityError::SessionInvalid)?;

    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| IdentityError::SessionInvalid)?;

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id_str.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| IdentityError::SessionInvalid)?;

    Uuid::parse_str(session_id_str)
        .map(SessionId::from_uuid)
        .map_err(|_| IdentityError::SessionInvalid)
}
