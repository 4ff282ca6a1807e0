//! Page fetching
//!
//! One GET per page, no retries, standard redirect handling. The body is
//! decoded as text and parsed into a `scraper::Html` tree that the extractor
//! modules query with CSS selectors. Documents are scoped to a single fetch:
//! callers scan them synchronously and drop them before the next request.

use crate::{OctodepsError, Result};
use reqwest::Client;
use scraper::Html;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("octodeps/", env!("CARGO_PKG_VERSION"));

/// Builds the default HTTP client used for page fetches.
///
/// Timeouts are deliberately conservative; everything else (redirects,
/// connection pooling) is reqwest's standard behavior.
pub fn build_http_client() -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and parses the response body as an HTML document.
///
/// # Errors
///
/// Any transport error or non-2xx status becomes
/// [`OctodepsError::FetchFailed`]; a 404 is not distinguished from a 500.
pub async fn fetch_html(client: &Client, url: &Url) -> Result<Html> {
    tracing::debug!(%url, "fetching page");

    let response = client
        .get(url.as_str())
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|source| OctodepsError::FetchFailed {
            url: url.to_string(),
            source,
        })?;

    let body = response
        .text()
        .await
        .map_err(|source| OctodepsError::FetchFailed {
            url: url.to_string(),
            source,
        })?;

    Ok(Html::parse_document(&body))
}
