//! Authentication module
//!
//! Twitch OAuth2 client-credentials flow for the IGDB API.
//!
//! The `TokenProvider` performs the single token exchange; `ApiAuth` attaches
//! the resulting `Client-ID` and bearer headers to each page request.

mod provider;
mod types;

pub use provider::TokenProvider;
pub use types::{AccessToken, ApiAuth, Credentials, CLIENT_ID_VAR, CLIENT_SECRET_VAR};
