//! The dependents crawl
//!
//! Walks every page of a repository's dependents listing, resolving each
//! listed `owner/name` token through the [`RepositoryResolver`], filtering
//! candidates by their own dependents count and by primary language, and
//! accumulating the survivors. Pages are fetched strictly one at a time,
//! following the next-page link chain until none remains; a visited-URL set
//! guarantees termination even if the page layout ever links back to an
//! already-scanned page.
//!
//! Candidate-level failures never abort a crawl. They are recorded in the
//! outcome's skip list with a reason, so callers and tests can see exactly
//! what was dropped and why. Only a fetch failure on a listing page itself
//! is fatal.

mod listing;

use crate::count::dependents_count;
use crate::fetch::fetch_html;
use crate::resolve::{RepositoryRef, RepositoryResolver};
use crate::url::{build_page_url, PageKind};
use crate::{OctodepsError, Result};
use listing::{CandidateToken, ListingPage};
use reqwest::Client;
use std::collections::{HashMap, HashSet};
use url::Url;

/// One dependents crawl request.
///
/// Defaults mirror the narrowest useful query: at least one dependent of
/// their own, same primary language as the target.
#[derive(Debug, Clone)]
pub struct DependentsQuery {
    pub repository: RepositoryRef,
    pub package_id: Option<String>,
    pub min_dependents: u64,
    pub same_language_only: bool,
}

impl DependentsQuery {
    pub fn new(repository: RepositoryRef) -> Self {
        Self {
            repository,
            package_id: None,
            min_dependents: 1,
            same_language_only: true,
        }
    }

    /// Scopes the crawl to one published package.
    pub fn package_id(mut self, id: impl Into<String>) -> Self {
        self.package_id = Some(id.into());
        self
    }

    /// Keeps only candidates with at least this many dependents themselves.
    pub fn min_dependents(mut self, min: u64) -> Self {
        self.min_dependents = min;
        self
    }

    /// Keeps only candidates sharing the target's primary language.
    /// Two absent languages count as equal.
    pub fn same_language_only(mut self, same: bool) -> Self {
        self.same_language_only = same;
        self
    }
}

/// Why a candidate was left out of the result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The resolver reported the repository does not exist.
    NotFound,
    /// The resolver lookup itself failed.
    ResolutionFailed(String),
    /// The candidate's own dependents count could not be obtained.
    CountFailed(String),
    /// The candidate's own dependents count missed the threshold.
    BelowThreshold { count: u64 },
    /// The candidate's primary language differs from the target's.
    LanguageMismatch { language: Option<String> },
}

/// A candidate that was seen on a listing page but not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCandidate {
    pub owner: String,
    pub name: String,
    pub reason: SkipReason,
}

/// The accumulated result of one dependents crawl.
#[derive(Debug, Default)]
pub struct CrawlOutcome {
    /// Accepted dependents, unique by owner+name.
    pub dependents: HashSet<RepositoryRef>,
    /// Candidates seen but not accepted, with the reason for each.
    pub skipped: Vec<SkippedCandidate>,
    /// Listing pages fetched over the whole crawl.
    pub pages_fetched: usize,
}

/// Crawls every page of a repository's dependents listing.
///
/// The first page URL comes from the query; each following page is the
/// literal next-page href harvested from its predecessor. The crawl ends
/// when a page has no next control, or when the next URL was already
/// scanned during this crawl.
///
/// # Errors
///
/// Fatal only for listing-page problems: URL construction failure, a fetch
/// failure on a listing page, or an unparsable next-page href. Per-candidate
/// failures are recorded in the outcome instead.
pub async fn list_dependents<R: RepositoryResolver>(
    client: &Client,
    resolver: &R,
    query: &DependentsQuery,
) -> Result<CrawlOutcome> {
    let mut url = build_page_url(
        query.repository.html_url.as_str(),
        PageKind::Dependents,
        query.package_id.as_deref(),
    )?;

    let mut visited: HashSet<Url> = HashSet::new();
    let mut counted: HashMap<String, u64> = HashMap::new();
    let mut outcome = CrawlOutcome::default();

    loop {
        if !visited.insert(url.clone()) {
            tracing::warn!(%url, "pagination revisited an already-scanned page, stopping");
            break;
        }

        tracing::debug!(%url, accepted = outcome.dependents.len(), "scanning dependents page");

        let page = {
            let html = fetch_html(client, &url).await?;
            ListingPage::scan(&html)
        };
        outcome.pages_fetched += 1;

        for candidate in page.candidates {
            process_candidate(client, resolver, query, candidate, &mut counted, &mut outcome)
                .await;
        }

        match page.next_url {
            Some(next) => {
                url = Url::parse(&next).map_err(|source| OctodepsError::MalformedUrl {
                    input: next,
                    source,
                })?;
            }
            None => break,
        }
    }

    Ok(outcome)
}

/// Resolves one listing token and runs it through the count and language
/// filters. Failures skip the candidate, never the crawl.
async fn process_candidate<R: RepositoryResolver>(
    client: &Client,
    resolver: &R,
    query: &DependentsQuery,
    candidate: CandidateToken,
    counted: &mut HashMap<String, u64>,
    outcome: &mut CrawlOutcome,
) {
    let CandidateToken { owner, name } = candidate;

    let repository = match resolver.resolve_repository(&owner, &name).await {
        Ok(Some(repository)) => repository,
        Ok(None) => {
            tracing::warn!(%owner, %name, "repository not found");
            outcome.skipped.push(SkippedCandidate {
                owner,
                name,
                reason: SkipReason::NotFound,
            });
            return;
        }
        Err(err) => {
            tracing::warn!(%owner, %name, %err, "repository resolution failed");
            outcome.skipped.push(SkippedCandidate {
                owner,
                name,
                reason: SkipReason::ResolutionFailed(err.to_string()),
            });
            return;
        }
    };

    // Counts are stable within one crawl: never refetched for a repository
    // already counted on this call.
    let full_name = repository.full_name();
    let count = match counted.get(&full_name).copied() {
        Some(count) => count,
        None => match dependents_count(client, &repository, None).await {
            Ok(parsed) => {
                let count = parsed.value();
                counted.insert(full_name, count);
                count
            }
            Err(err) => {
                tracing::warn!(repository = %full_name, %err, "unable to count dependents");
                outcome.skipped.push(SkippedCandidate {
                    owner,
                    name,
                    reason: SkipReason::CountFailed(err.to_string()),
                });
                return;
            }
        },
    };

    if count < query.min_dependents {
        tracing::debug!(
            repository = %repository.full_name(),
            count,
            min = query.min_dependents,
            "missed dependents threshold"
        );
        outcome.skipped.push(SkippedCandidate {
            owner,
            name,
            reason: SkipReason::BelowThreshold { count },
        });
        return;
    }

    if query.same_language_only && repository.language != query.repository.language {
        tracing::warn!(
            repository = %repository.full_name(),
            language = ?repository.language,
            wanted = ?query.repository.language,
            "language mismatch"
        );
        outcome.skipped.push(SkippedCandidate {
            owner,
            name,
            reason: SkipReason::LanguageMismatch {
                language: repository.language.clone(),
            },
        });
        return;
    }

    outcome.dependents.insert(repository);
}
