//! URL similarity used to spot bookmarks that already cover a page.

use url::{Host, Position, Url};

use crate::types::bookmark::LocalBookmark;
use crate::types::url_match::URLMatch;

fn is_http_or_https(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Everything after the scheme: `//user@host:port/path?query#fragment`.
fn href_sans_protocol(url: &Url) -> &str {
    &url[Position::AfterScheme..]
}

/// Host name minus subdomains. IP addresses and single-label hosts are
/// returned whole.
fn registrable_domain(url: &Url) -> Option<String> {
    match url.host()? {
        Host::Domain(domain) => {
            let domain = domain.trim_end_matches('.').to_lowercase();
            let labels: Vec<&str> = domain.split('.').collect();
            if labels.len() <= 2 {
                Some(domain)
            } else {
                Some(labels[labels.len() - 2..].join("."))
            }
        }
        Host::Ipv4(ip) => Some(ip.to_string()),
        Host::Ipv6(ip) => Some(ip.to_string()),
    }
}

/// Compares two URLs. Symmetric in its arguments.
pub fn match_urls(x: &Url, y: &Url) -> URLMatch {
    // Non-web URLs are never treated as duplicates
    if !is_http_or_https(x) || !is_http_or_https(y) {
        return URLMatch::None;
    }

    if href_sans_protocol(x) == href_sans_protocol(y) {
        return URLMatch::Exact;
    }

    match (registrable_domain(x), registrable_domain(y)) {
        (Some(a), Some(b)) if a == b => URLMatch::Domain,
        _ => URLMatch::None,
    }
}

/// Like [`match_urls`] but over raw strings; anything that fails to parse
/// is `URLMatch::None`.
pub fn match_str(x: &str, y: &str) -> URLMatch {
    match (Url::parse(x), Url::parse(y)) {
        (Ok(a), Ok(b)) => match_urls(&a, &b),
        _ => URLMatch::None,
    }
}

/// Bookmarks that resemble `url`, best match first. Ties keep input order.
pub fn rank_by_match<'a>(url: &Url, bookmarks: &'a [LocalBookmark]) -> Vec<(URLMatch, &'a LocalBookmark)> {
    let mut ranked: Vec<(URLMatch, &LocalBookmark)> = bookmarks
        .iter()
        .filter_map(|bm| {
            let candidate = Url::parse(&bm.url).ok()?;
            match match_urls(url, &candidate) {
                URLMatch::None => None,
                m => Some((m, bm)),
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    ranked
}

/// The single closest bookmark to `url`, if any ranks above `URLMatch::None`.
pub fn best_match<'a>(url: &Url, bookmarks: &'a [LocalBookmark]) -> Option<(URLMatch, &'a LocalBookmark)> {
    rank_by_match(url, bookmarks).into_iter().next()
}
