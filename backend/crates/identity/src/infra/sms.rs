//! Challenge Delivery Implementations
//!
//! `HttpSmsSender` posts to an SMS gateway; `LogSender` writes the code
//! to the log for development runs without a gateway account.

use reqwest::Client;
use serde_json::json;

use crate::domain::gateway::ChallengeSender;
use crate::domain::value_object::{OtpCode, PhoneNumber};
use crate::error::{IdentityError, IdentityResult};

/// SMS gateway configuration
#[derive(Debug, Clone)]
pub struct SmsConfig {
    /// Gateway endpoint accepting `{"to": ..., "body": ...}` JSON
    pub api_url: String,
    /// Bearer token for the gateway
    pub api_key: String,
}

/// HTTP gateway-backed sender
#[derive(Clone)]
pub struct HttpSmsSender {
    config: SmsConfig,
    client: Client,
}

impl HttpSmsSender {
    pub fn new(config: SmsConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

impl ChallengeSender for HttpSmsSender {
    async fn send(&self, phone: &PhoneNumber, code: &OtpCode) -> IdentityResult<()> {
        self.client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&json!({
                "to": phone.as_str(),
                "body": format!("Your verification code is {}", code.as_str()),
            }))
            .send()
            .await
            .map_err(|e| IdentityError::Delivery(format!("SMS request failed: {e}")))?
            .error_for_status()
            .map_err(|e| IdentityError::Delivery(format!("SMS gateway rejected: {e}")))?;

        Ok(())
    }
}

/// Development sender that logs instead of sending
#[derive(Clone, Default)]
pub struct LogSender;

impl ChallengeSender for LogSender {
    async fn send(&self, phone: &PhoneNumber, code: &OtpCode) -> IdentityResult<()> {
        // The code is deliberately visible here; this sender is for
        // local development only.
        tracing::info!(phone = ?phone, code = code.as_str(), "Verification code (not sent)");
        Ok(())
    }
}

/// Test sender that records delivered codes
#[cfg(test)]
#[derive(Default)]
pub struct RecordingSender {
    sent: tokio::sync::Mutex<Vec<(String, String)>>,
}

#[cfg(test)]
impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// The code from the most recent send, if any
    pub async fn last_code(&self) -> Option<String> {
        self.sent.lock().await.last().map(|(_, code)| code.clone())
    }
}

#[cfg(test)]
impl ChallengeSender for RecordingSender {
    async fn send(&self, phone: &PhoneNumber, code: &OtpCode) -> IdentityResult<()> {
        self.sent
            .lock()
            .await
            .push((phone.as_str().to_string(), code.as_str().to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_sender_always_succeeds() {
        let sender = LogSender;
        let phone = PhoneNumber::new("09012345678").unwrap();
        let code = OtpCode::new("123456").unwrap();
        sender.send(&phone, &code).await.unwrap();
    }

    #[tokio::test]
    async fn test_recording_sender_keeps_last() {
        let sender = RecordingSender::new();
        let phone = PhoneNumber::new("09012345678").unwrap();
        sender
            .send(&phone, &OtpCode::new("111111").unwrap())
            .await
            .unwrap();
        sender
            .send(&phone, &OtpCode::new("222222").unwrap())
            .await
            .unwrap();
        assert_eq!(sender.last_code().await.as_deref(), Some("222222"));
    }
}
