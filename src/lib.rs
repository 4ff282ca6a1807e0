//! Octodeps: GitHub dependents and packages via the HTML-only network pages
//!
//! GitHub exposes a repository's published packages and its dependents
//! listing (the "network/dependents" page) only through rendered HTML, not
//! through the public API. This crate fetches those pages, extracts package
//! identifiers and dependents counts, and crawls the paginated dependents
//! listing with threshold and language filtering.
//!
//! Repository identity is never constructed here: every `owner/name` token
//! scraped from a page is resolved through a caller-supplied
//! [`RepositoryResolver`], the narrow contract onto whatever API client the
//! application already uses.

pub mod client;
pub mod count;
pub mod crawler;
pub mod fetch;
pub mod packages;
pub mod resolve;
pub mod url;

use thiserror::Error;

/// Main error type for octodeps operations
#[derive(Debug, Error)]
pub enum OctodepsError {
    #[error("failed to fetch {url}")]
    FetchFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed URL: {input}")]
    MalformedUrl {
        input: String,
        #[source]
        source: ::url::ParseError,
    },

    #[error("dependents count label not found at {url}")]
    CountUnavailable { url: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("resolver error: {0}")]
    Resolve(#[from] resolve::ResolveError),
}

/// Result type alias for octodeps operations
pub type Result<T> = std::result::Result<T, OctodepsError>;

// Re-export commonly used types
pub use client::NetworkClient;
pub use count::{dependents_count, parse_count_label, DependentsCount};
pub use crawler::{list_dependents, CrawlOutcome, DependentsQuery, SkipReason, SkippedCandidate};
pub use fetch::{build_http_client, fetch_html};
pub use packages::{extract_packages, PackageRef};
pub use resolve::{Owner, RepositoryRef, RepositoryResolver, ResolveError};
pub use url::{build_page_url, PageKind};
