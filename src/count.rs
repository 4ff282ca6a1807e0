//! Dependents count parsing
//!
//! A dependents page carries an "N Repositories" label in its first
//! link-styled button. The number uses US grouping (comma thousands
//! separators). A missing label is an error; a label whose text does not
//! match the expected shape is not — it yields [`DependentsCount::Unparsed`],
//! which counts as zero. That leniency tolerates page variants without
//! crashing callers, and the tagged variant lets them tell "zero dependents"
//! from "label format unrecognized".

use crate::fetch::fetch_html;
use crate::resolve::RepositoryRef;
use crate::url::{build_page_url, PageKind};
use crate::{OctodepsError, Result};
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static COUNT_LABEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.btn-link:nth-child(1)").expect("static selector"));

static COUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([0-9,]+)\s+Repositories\s*$").expect("static pattern"));

/// A parsed dependents count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependentsCount {
    /// The label matched `N Repositories`.
    Counted(u64),
    /// The label was present but not in the expected shape; counts as zero.
    Unparsed,
}

impl DependentsCount {
    pub fn value(self) -> u64 {
        match self {
            DependentsCount::Counted(n) => n,
            DependentsCount::Unparsed => 0,
        }
    }
}

/// Parses the text of a count label.
pub fn parse_count_label(text: &str) -> DependentsCount {
    match COUNT_PATTERN.captures(text) {
        Some(captures) => {
            let digits = captures[1].replace(',', "");
            match digits.parse::<u64>() {
                Ok(n) => DependentsCount::Counted(n),
                Err(_) => DependentsCount::Unparsed,
            }
        }
        None => DependentsCount::Unparsed,
    }
}

/// Locates the count label on a dependents page; `None` when absent.
pub(crate) fn scan_count(html: &Html) -> Option<DependentsCount> {
    let label = html.select(&COUNT_LABEL).next()?;
    let text = label.text().collect::<String>();
    Some(parse_count_label(&text))
}

/// Fetches a repository's dependents page and reads its count label.
///
/// A present `package_id` scopes the count to one published package.
///
/// # Errors
///
/// [`OctodepsError::CountUnavailable`] when the label element is absent,
/// plus the usual URL construction and fetch failures.
pub async fn dependents_count(
    client: &Client,
    repository: &RepositoryRef,
    package_id: Option<&str>,
) -> Result<DependentsCount> {
    let url = build_page_url(repository.html_url.as_str(), PageKind::Dependents, package_id)?;
    let html = fetch_html(client, &url).await?;
    scan_count(&html).ok_or(OctodepsError::CountUnavailable {
        url: url.to_string(),
    })
}
