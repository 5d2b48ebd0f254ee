//! Page fetching
//!
//! One authenticated request per page. The `PageFetcher` trait is the seam
//! the ingestion loop is written against; `HttpPageFetcher` is the live
//! implementation over [`HttpClient`].

use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::QueryState;
use crate::types::{JsonValue, Page};
use async_trait::async_trait;
use tracing::debug;

/// Source of record pages
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one page of `endpoint` using `query`.
    ///
    /// Errors are fatal to the caller; implementations do not retry.
    async fn fetch_page(&self, endpoint: &str, query: &QueryState) -> Result<Page>;
}

/// Fetches pages from the API over HTTP
#[derive(Debug)]
pub struct HttpPageFetcher {
    client: HttpClient,
}

impl HttpPageFetcher {
    /// Create a fetcher over an (authenticated) client
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, endpoint: &str, query: &QueryState) -> Result<Page> {
        let config = RequestConfig::new().queries(query.to_params());
        let body: JsonValue = self.client.get_json_with_config(endpoint, config).await?;
        let page = decode_page(body)?;

        debug!(
            endpoint,
            offset = query.offset,
            records = page.len(),
            "Fetched page"
        );
        Ok(page)
    }
}

/// Turn a response body into a page: it must be an array of objects
pub fn decode_page(body: JsonValue) -> Result<Page> {
    let JsonValue::Array(items) = body else {
        return Err(Error::decode(format!(
            "Expected a JSON array of records, got {}",
            describe(&body)
        )));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            JsonValue::Object(record) => Ok(record),
            other => Err(Error::decode(format!(
                "Record {i} is {}, expected an object",
                describe(&other)
            ))),
        })
        .collect()
}

fn describe(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
