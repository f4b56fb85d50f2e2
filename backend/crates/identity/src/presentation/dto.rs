//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

// ============================================================================
// Form Descriptors
// ============================================================================

/// Descriptor for a form-style page, listing the fields the client
/// should submit and where
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDescriptor {
    pub action: &'static str,
    pub method: &'static str,
    pub fields: &'static [&'static str],
}

// ============================================================================
// Register / Login
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_name: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

// ============================================================================
// OAuth Callback
// ============================================================================

/// Query parameters on the provider callback
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthCallbackQuery {
    /// Authorization code; absent when the user denied consent
    pub code: Option<String>,
    /// Provider-reported error, if any
    pub error: Option<String>,
}

// ============================================================================
// Phone Registration
// ============================================================================

/// Send one-time code request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    pub phone: String,
    pub user_name: String,
    pub password: String,
}

/// Verify one-time code request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub phone: String,
    pub code: String,
}

/// Verify one-time code response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    pub user_name: String,
    pub registered: bool,
}
