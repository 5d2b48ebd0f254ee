//! Auth types
//!
//! Client credentials, the access token they buy, and the header set
//! attached to every API request.

use crate::error::{Error, Result};
use chrono::{DateTime, TimeDelta, Utc};
use reqwest::RequestBuilder;
use std::fmt;

/// Environment variable holding the client id
pub const CLIENT_ID_VAR: &str = "CLIENT_ID";

/// Environment variable holding the client secret
pub const CLIENT_SECRET_VAR: &str = "CLIENT_SECRET";

/// OAuth2 client credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Client ID (also sent as the `Client-ID` header)
    pub client_id: String,
    /// Client secret
    pub client_secret: String,
}

impl Credentials {
    /// Create credentials from explicit values
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Read `CLIENT_ID` and `CLIENT_SECRET` from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::missing_field(key))
        };

        Ok(Self {
            client_id: read(CLIENT_ID_VAR)?,
            client_secret: read(CLIENT_SECRET_VAR)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Bearer token returned by the token endpoint
#[derive(Clone)]
pub struct AccessToken {
    /// The access token
    pub token: String,
    /// When the token expires, if the endpoint said
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Create a new token
    pub fn new(token: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// Create a token that expires in N seconds from now.
    ///
    /// Fails when the expiry does not fit in a timestamp.
    pub fn expires_in(token: impl Into<String>, seconds: i64) -> Result<Self> {
        let expires_at = TimeDelta::try_seconds(seconds)
            .and_then(|delta| Utc::now().checked_add_signed(delta))
            .ok_or_else(|| Error::auth(format!("Token expiry out of range: {seconds}s")))?;

        Ok(Self {
            token: token.into(),
            expires_at: Some(expires_at),
        })
    }

    /// Seconds of validity left, if an expiry is known
    pub fn remaining_seconds(&self) -> Option<i64> {
        self.expires_at
            .map(|at| (at - Utc::now()).num_seconds().max(0))
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Authentication applied to API requests: `Client-ID` plus bearer token.
///
/// Tokens are never refreshed; a run that outlives its token fails with the
/// API's 401.
#[derive(Debug, Clone)]
pub struct ApiAuth {
    client_id: String,
    token: AccessToken,
}

impl ApiAuth {
    /// Combine the client id with an acquired token
    pub fn new(client_id: impl Into<String>, token: AccessToken) -> Self {
        Self {
            client_id: client_id.into(),
            token,
        }
    }

    /// The client id sent with each request
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The bearer token
    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    /// Attach the auth headers to a request
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("Client-ID", self.client_id.as_str())
            .bearer_auth(&self.token.token)
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_credentials_from_lookup() {
        let vars: HashMap<&str, &str> =
            HashMap::from([("CLIENT_ID", "abc"), ("CLIENT_SECRET", "shh")]);
        let creds = Credentials::from_lookup(|k| vars.get(k).map(ToString::to_string)).unwrap();
        assert_eq!(creds, Credentials::new("abc", "shh"));
    }

    #[test]
    fn test_credentials_missing_secret() {
        let err = Credentials::from_lookup(|k| (k == "CLIENT_ID").then(|| "abc".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { field } if field == "CLIENT_SECRET"));
    }

    #[test]
    fn test_credentials_blank_is_missing() {
        let err = Credentials::from_lookup(|_| Some("   ".to_string())).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { field } if field == "CLIENT_ID"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::new("abc", "super-secret");
        assert!(!format!("{creds:?}").contains("super-secret"));

        let token = AccessToken::new("tok-123", None);
        assert!(!format!("{token:?}").contains("tok-123"));
    }

    #[test]
    fn test_token_remaining() {
        assert_eq!(AccessToken::new("t", None).remaining_seconds(), None);
        let remaining = AccessToken::expires_in("t", 3600)
            .unwrap()
            .remaining_seconds()
            .unwrap();
        assert!(remaining > 3500 && remaining <= 3600);
        assert_eq!(
            AccessToken::expires_in("t", -10).unwrap().remaining_seconds(),
            Some(0)
        );
    }

    #[test]
    fn test_access_token_expiry_out_of_range() {
        assert!(AccessToken::expires_in("t", i64::MAX).unwrap_err().is_auth());
        assert!(AccessToken::expires_in("t", i64::MIN).unwrap_err().is_auth());
    }
}
