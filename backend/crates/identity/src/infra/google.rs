//! Google OAuth Provider Verifier
//!
//! Authorization-code flow against Google. `authorize_url` points the
//! browser at the consent screen; `exchange` trades the returned code
//! for an access token and fetches the userinfo profile with it.

use reqwest::Client;
use serde::Deserialize;

use crate::domain::gateway::{ProviderProfile, ProviderVerifier};
use crate::domain::value_object::ProviderId;
use crate::error::{IdentityError, IdentityResult};

const AUTHORIZE_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// Google OAuth client configuration
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// Google-backed provider verifier
#[derive(Clone)]
pub struct GoogleProviderVerifier {
    config: GoogleConfig,
    client: Client,
}

impl GoogleProviderVerifier {
    pub fn new(config: GoogleConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct UserInfoResponse {
    sub: String,
    name: Option<String>,
}

impl ProviderVerifier for GoogleProviderVerifier {
    fn authorize_url(&self) -> String {
        let mut url = reqwest::Url::parse(AUTHORIZE_ENDPOINT)
            .expect("static endpoint URL is valid");
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", "openid profile");
        url.into()
    }

    async fn exchange(&self, code: &str) -> IdentityResult<ProviderProfile> {
        let token: TokenResponse = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("code", code),
                ("client_id", &self.config.client_id),
                ("client_secret", &self.config.client_secret),
                ("redirect_uri", &self.config.redirect_uri),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| IdentityError::Provider(format!("Token request failed: {e}")))?
            .error_for_status()
            .map_err(|e| IdentityError::Provider(format!("Token exchange rejected: {e}")))?
            .json()
            .await
            .map_err(|e| IdentityError::Provider(format!("Malformed token response: {e}")))?;

        let info: UserInfoResponse = self
            .client
            .get(USERINFO_ENDPOINT)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| IdentityError::Provider(format!("Userinfo request failed: {e}")))?
            .error_for_status()
            .map_err(|e| IdentityError::Provider(format!("Userinfo rejected: {e}")))?
            .json()
            .await
            .map_err(|e| IdentityError::Provider(format!("Malformed userinfo: {e}")))?;

        let subject = ProviderId::new(info.sub)
            .map_err(|_| IdentityError::Provider("Empty subject in userinfo".to_string()))?;

        Ok(ProviderProfile {
            subject,
            display_name: info.name,
        })
    }
}
