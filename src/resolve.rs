//! The external repository-resolution contract
//!
//! The crate never constructs repository identity from scraped text on its
//! own. Every `owner/name` token harvested from a page goes through a
//! [`RepositoryResolver`], the seam onto whatever GitHub API client the
//! application already holds.

use std::hash::{Hash, Hasher};
use thiserror::Error;
use url::Url;

/// Error produced by a [`RepositoryResolver`] implementation.
///
/// Implementations wrap whatever error type their underlying API client
/// surfaces.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ResolveError(Box<dyn std::error::Error + Send + Sync>);

impl ResolveError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(source.into())
    }
}

/// An owner lookup result with the entity kind made explicit.
///
/// Organizations and users are distinct entity kinds on the API side; the
/// resolver reports which one matched instead of leaving callers to probe
/// one endpoint and fall back to the other on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Owner {
    Organization { login: String },
    User { login: String },
}

impl Owner {
    pub fn login(&self) -> &str {
        match self {
            Owner::Organization { login } | Owner::User { login } => login,
        }
    }
}

/// A resolved repository, as handed out by the resolver.
///
/// The crate only reads `html_url` (to locate the HTML-only pages) and
/// `language` (for the same-language filter). Identity is owner plus name.
#[derive(Debug, Clone)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
    pub html_url: Url,
    pub language: Option<String>,
}

impl RepositoryRef {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

// Identity is owner+name; html_url and language are attributes, not identity.
impl PartialEq for RepositoryRef {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.name == other.name
    }
}

impl Eq for RepositoryRef {}

impl Hash for RepositoryRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.name.hash(state);
    }
}

/// Resolves owners and repositories through an external API client.
///
/// `Ok(None)` means "looked up cleanly, does not exist"; `Err` means the
/// lookup itself failed. The crawler treats both as reasons to skip a
/// candidate, but reports them distinctly.
#[allow(async_fn_in_trait)]
pub trait RepositoryResolver {
    /// Looks up a login as either an organization or a user.
    async fn resolve_owner(&self, login: &str) -> Result<Option<Owner>, ResolveError>;

    /// Looks up a repository by owner login and repository name.
    async fn resolve_repository(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Option<RepositoryRef>, ResolveError>;
}
