//! HTTP client module
//!
//! Provides the authenticated, single-attempt HTTP client used for page
//! requests.
//!
//! # Features
//!
//! - **Base URL joining**: endpoint names are appended to the API root
//! - **Authentication**: `Client-ID` and bearer headers via `ApiAuth`
//! - **Status classification**: any non-2xx status becomes `Error::HttpStatus`

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
