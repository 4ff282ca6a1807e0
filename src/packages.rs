//! Package extraction from a repository's packages page
//!
//! The page lists published packages as select-menu anchors whose `href`
//! carries a `package_id` query value and whose nested span holds the
//! human-readable package name. Anchors without a matching href or with an
//! empty label are skipped, never an error.

use percent_encoding::percent_decode_str;
use regex::Regex;
use scraper::{Html, Selector};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static PACKAGE_ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.select-menu-item").expect("static selector"));

static PACKAGE_LABEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span").expect("static selector"));

static PACKAGE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^?]+\?package_id=([A-Za-z0-9=]+)").expect("static pattern"));

/// A published package reference: platform-assigned id plus display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRef {
    pub id: String,
    pub name: String,
}

// Ordered by name; id breaks ties so the ordering stays consistent with Eq.
impl Ord for PackageRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name).then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for PackageRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Extracts the set of published packages from a packages page.
///
/// Each select-menu anchor's `href` is percent-decoded and matched for a
/// `package_id` query value; the anchor's span text, trimmed, becomes the
/// package name. Duplicate (id, name) pairs collapse.
pub fn extract_packages(html: &Html) -> BTreeSet<PackageRef> {
    let mut packages = BTreeSet::new();

    for anchor in html.select(&PACKAGE_ANCHOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let decoded = percent_decode_str(href).decode_utf8_lossy();
        let Some(captures) = PACKAGE_ID.captures(&decoded) else {
            continue;
        };
        let id = captures[1].to_string();

        let Some(label) = anchor.select(&PACKAGE_LABEL).next() else {
            continue;
        };
        let name = label.text().collect::<String>().trim().to_string();
        if name.is_empty() {
            continue;
        }

        packages.insert(PackageRef { id, name });
    }

    packages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> Html {
        Html::parse_document(&format!("<html><body>{body}</body></html>"))
    }

    #[test]
    fn extracts_id_and_label() {
        let html = page(
            r#"<a class="select-menu-item" href="/acme/core/packages/123?package_id=ABC">
                 <span>lib:core</span>
               </a>"#,
        );
        let packages = extract_packages(&html);
        assert_eq!(packages.len(), 1);
        let package = packages.iter().next().unwrap();
        assert_eq!(package.id, "ABC");
        assert_eq!(package.name, "lib:core");
    }

    #[test]
    fn decodes_percent_encoded_href() {
        let html = page(
            r#"<a class="select-menu-item" href="/acme/core/packages/123%3Fpackage_id%3DUGFja2FnZS0xMjM%3D">
                 <span>com.acme:core</span>
               </a>"#,
        );
        let packages = extract_packages(&html);
        assert_eq!(packages.len(), 1);
        assert_eq!(packages.iter().next().unwrap().id, "UGFja2FnZS0xMjM=");
    }

    #[test]
    fn no_matching_anchors_is_empty_not_an_error() {
        let html = page(r#"<a href="/elsewhere">plain link</a>"#);
        assert!(extract_packages(&html).is_empty());
    }

    #[test]
    fn anchor_without_package_id_is_skipped() {
        let html = page(
            r#"<a class="select-menu-item" href="/acme/core/packages/123"><span>orphan</span></a>"#,
        );
        assert!(extract_packages(&html).is_empty());
    }

    #[test]
    fn empty_label_is_skipped() {
        let html = page(
            r#"<a class="select-menu-item" href="/p?package_id=ABC"><span>   </span></a>
               <a class="select-menu-item" href="/p?package_id=DEF"></a>"#,
        );
        assert!(extract_packages(&html).is_empty());
    }

    #[test]
    fn duplicates_collapse() {
        let html = page(
            r#"<a class="select-menu-item" href="/p?package_id=ABC"><span>lib:core</span></a>
               <a class="select-menu-item" href="/p?package_id=ABC"><span>lib:core</span></a>"#,
        );
        assert_eq!(extract_packages(&html).len(), 1);
    }

    #[test]
    fn ordering_is_by_name() {
        let a = PackageRef {
            id: "2".to_string(),
            name: "alpha".to_string(),
        };
        let b = PackageRef {
            id: "1".to_string(),
            name: "beta".to_string(),
        };
        assert!(a < b);

        let set: BTreeSet<_> = [b.clone(), a.clone()].into_iter().collect();
        assert_eq!(set.into_iter().next().unwrap(), a);
    }
}
