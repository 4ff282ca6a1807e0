//! Per-page scan of a dependents listing
//!
//! One listing page yields the `owner/name` tokens of its rows and the href
//! of the "next page" control, when present. Everything is read out of the
//! document synchronously so the page tree can be dropped before any
//! network work on the candidates begins.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static LISTING_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.Box-row > span").expect("static selector"));

static NEXT_PAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.btn:nth-child(2)").expect("static selector"));

static REPO_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\S+)\s*/\s*(\S+)\s*$").expect("static pattern"));

/// An unresolved `owner/name` token from a listing row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CandidateToken {
    pub owner: String,
    pub name: String,
}

/// Everything a crawl step needs from one listing page.
#[derive(Debug, Default)]
pub(crate) struct ListingPage {
    pub candidates: Vec<CandidateToken>,
    pub next_url: Option<String>,
}

impl ListingPage {
    /// Scans a dependents listing page. Rows that do not carry an
    /// `owner/name` token are skipped.
    pub fn scan(html: &Html) -> Self {
        let mut candidates = Vec::new();
        for row in html.select(&LISTING_ROW) {
            let text = row.text().collect::<String>();
            if let Some(captures) = REPO_TOKEN.captures(&text) {
                candidates.push(CandidateToken {
                    owner: captures[1].to_string(),
                    name: captures[2].to_string(),
                });
            }
        }

        let next_url = html
            .select(&NEXT_PAGE)
            .next()
            .and_then(|anchor| anchor.value().attr("href"))
            .map(str::to_string);

        ListingPage { candidates, next_url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> Html {
        Html::parse_document(&format!("<html><body>{body}</body></html>"))
    }

    #[test]
    fn scans_rows_into_tokens() {
        let html = page(
            r#"<div class="Box-row"><span>alice / widget</span></div>
               <div class="Box-row"><span>bob/gadget</span></div>"#,
        );
        let listing = ListingPage::scan(&html);
        assert_eq!(
            listing.candidates,
            vec![
                CandidateToken {
                    owner: "alice".to_string(),
                    name: "widget".to_string()
                },
                CandidateToken {
                    owner: "bob".to_string(),
                    name: "gadget".to_string()
                },
            ]
        );
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let html = page(
            r#"<div class="Box-row"><span>not a repository token</span></div>
               <div class="Box-row"><span></span></div>
               <div class="Box-row"><span>carol / tool</span></div>"#,
        );
        let listing = ListingPage::scan(&html);
        assert_eq!(listing.candidates.len(), 1);
        assert_eq!(listing.candidates[0].owner, "carol");
    }

    #[test]
    fn next_link_is_the_second_button() {
        let html = page(
            r#"<div class="Box-row"><span>alice / widget</span></div>
               <div class="BtnGroup">
                 <a class="btn" href="/page1">Previous</a>
                 <a class="btn" href="/page3">Next</a>
               </div>"#,
        );
        let listing = ListingPage::scan(&html);
        assert_eq!(listing.next_url.as_deref(), Some("/page3"));
    }

    #[test]
    fn no_next_control_on_the_last_page() {
        let html = page(
            r#"<div class="Box-row"><span>alice / widget</span></div>
               <div class="BtnGroup">
                 <a class="btn" href="/page1">Previous</a>
               </div>"#,
        );
        let listing = ListingPage::scan(&html);
        assert!(listing.next_url.is_none());
    }
}
