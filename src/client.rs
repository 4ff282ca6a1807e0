//! Client facade
//!
//! [`NetworkClient`] pairs an HTTP client for the HTML-only pages with the
//! resolver onto the caller's API client, and exposes the three page
//! operations plus the resolver passthroughs as one surface.

use crate::count::{self, DependentsCount};
use crate::crawler::{self, CrawlOutcome, DependentsQuery};
use crate::fetch::{build_http_client, fetch_html};
use crate::packages::{extract_packages, PackageRef};
use crate::resolve::{Owner, RepositoryRef, RepositoryResolver};
use crate::url::{build_page_url, PageKind};
use crate::Result;
use reqwest::Client;
use std::collections::BTreeSet;

/// Client for the data GitHub exposes only through rendered HTML.
pub struct NetworkClient<R> {
    http: Client,
    resolver: R,
}

impl<R: RepositoryResolver> NetworkClient<R> {
    /// Creates a client with the default HTTP configuration.
    pub fn new(resolver: R) -> Result<Self> {
        Ok(Self {
            http: build_http_client()?,
            resolver,
        })
    }

    /// Creates a client around an existing HTTP client.
    pub fn with_http_client(http: Client, resolver: R) -> Self {
        Self { http, resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Looks up a login as an organization or a user.
    pub async fn resolve_owner(&self, login: &str) -> Result<Option<Owner>> {
        Ok(self.resolver.resolve_owner(login).await?)
    }

    /// Looks up a repository by owner login and name.
    pub async fn repository(&self, owner: &str, name: &str) -> Result<Option<RepositoryRef>> {
        Ok(self.resolver.resolve_repository(owner, name).await?)
    }

    /// Lists the packages published by a repository.
    pub async fn list_packages(&self, repository: &RepositoryRef) -> Result<BTreeSet<PackageRef>> {
        let url = build_page_url(repository.html_url.as_str(), PageKind::Packages, None)?;
        let html = fetch_html(&self.http, &url).await?;
        Ok(extract_packages(&html))
    }

    /// Reads the dependents count from a repository's dependents page,
    /// optionally scoped to one published package.
    pub async fn dependents_count(
        &self,
        repository: &RepositoryRef,
        package_id: Option<&str>,
    ) -> Result<DependentsCount> {
        count::dependents_count(&self.http, repository, package_id).await
    }

    /// Crawls the full dependents listing described by `query`.
    pub async fn list_dependents(&self, query: &DependentsQuery) -> Result<CrawlOutcome> {
        crawler::list_dependents(&self.http, &self.resolver, query).await
    }
}
