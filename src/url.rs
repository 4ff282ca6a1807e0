//! Construction of the HTML-only page URLs
//!
//! The dependents and packages pages hang off a repository's canonical web
//! URL. The path is appended by plain concatenation (the pages are not
//! addressable any other way), and an optional package id is carried as a
//! form-encoded `package_id` query parameter.

use crate::{OctodepsError, Result};
use url::Url;

/// The two HTML-only page kinds this crate knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// The repository's published packages page.
    Packages,
    /// The paginated dependents listing.
    Dependents,
}

impl PageKind {
    fn path(self) -> &'static str {
        match self {
            PageKind::Packages => "packages",
            PageKind::Dependents => "network/dependents",
        }
    }
}

/// Builds the URL for one of the HTML-only pages of a repository.
///
/// `base` is the repository's canonical web URL (e.g.
/// `https://github.com/owner/name`). A present `package_id` scopes the page
/// to a single published package and is appended form-encoded, so decoding
/// the query parameter yields the original id exactly.
///
/// # Errors
///
/// Returns [`OctodepsError::MalformedUrl`] when base plus path does not parse
/// as a URL.
pub fn build_page_url(base: &str, kind: PageKind, package_id: Option<&str>) -> Result<Url> {
    let raw = format!("{}/{}", base.trim_end_matches('/'), kind.path());
    let mut url = Url::parse(&raw).map_err(|source| OctodepsError::MalformedUrl {
        input: raw.clone(),
        source,
    })?;

    if let Some(id) = package_id {
        url.query_pairs_mut().append_pair("package_id", id);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependents_path() {
        let url = build_page_url("https://github.com/acme/core", PageKind::Dependents, None).unwrap();
        assert_eq!(url.as_str(), "https://github.com/acme/core/network/dependents");
    }

    #[test]
    fn packages_path() {
        let url = build_page_url("https://github.com/acme/core", PageKind::Packages, None).unwrap();
        assert_eq!(url.as_str(), "https://github.com/acme/core/packages");
    }

    #[test]
    fn trailing_slash_on_base() {
        let url = build_page_url("https://github.com/acme/core/", PageKind::Dependents, None).unwrap();
        assert_eq!(url.as_str(), "https://github.com/acme/core/network/dependents");
    }

    #[test]
    fn package_id_is_form_encoded() {
        let url = build_page_url(
            "https://github.com/acme/core",
            PageKind::Dependents,
            Some("UGFja2FnZS0xMjM="),
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://github.com/acme/core/network/dependents?package_id=UGFja2FnZS0xMjM%3D"
        );
    }

    #[test]
    fn package_id_round_trips_through_the_query() {
        let id = "UGFja2FnZS0yNTUyODg0ODc=/&?odd chars";
        let url =
            build_page_url("https://github.com/acme/core", PageKind::Dependents, Some(id)).unwrap();

        let decoded = url
            .query_pairs()
            .find(|(key, _)| key == "package_id")
            .map(|(_, value)| value.into_owned())
            .unwrap();
        assert_eq!(decoded, id);
    }

    #[test]
    fn malformed_base_is_an_error() {
        let result = build_page_url("not a url", PageKind::Dependents, None);
        assert!(matches!(result, Err(OctodepsError::MalformedUrl { .. })));
    }
}
