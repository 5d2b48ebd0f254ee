//! Token provider
//!
//! One client-credentials exchange per run. No retry, no refresh.

use super::types::{AccessToken, Credentials};
use crate::error::{Error, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Exchanges client credentials for a bearer token
#[derive(Debug, Clone)]
pub struct TokenProvider {
    /// Token endpoint URL
    token_url: String,
    /// HTTP client for token requests
    http_client: Client,
}

impl TokenProvider {
    /// Create a provider for the given token endpoint
    pub fn new(token_url: impl Into<String>) -> Self {
        Self::with_client(token_url, Client::new())
    }

    /// Create a provider with a custom HTTP client
    pub fn with_client(token_url: impl Into<String>, http_client: Client) -> Self {
        Self {
            token_url: token_url.into(),
            http_client,
        }
    }

    /// The token endpoint URL
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Fetch an access token using the client credentials flow
    pub async fn fetch_token(&self, credentials: &Credentials) -> Result<AccessToken> {
        let form = [
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("grant_type", "client_credentials"),
        ];

        debug!(token_url = %self.token_url, "Requesting access token");

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::OAuth2 {
                message: format!("Token request failed with status {status}: {body}"),
            });
        }

        let body = response.text().await.map_err(Error::Http)?;
        let token_response: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| Error::auth(format!("Token response has no access_token: {e}")))?;

        if token_response.access_token.is_empty() {
            return Err(Error::auth("Token endpoint returned an empty access_token"));
        }

        token_response.into_access_token()
    }
}

/// OAuth2 token response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl TokenResponse {
    fn into_access_token(self) -> Result<AccessToken> {
        match self.expires_in {
            Some(secs) => AccessToken::expires_in(self.access_token, secs),
            None => Ok(AccessToken::new(self.access_token, None)),
        }
    }
}
