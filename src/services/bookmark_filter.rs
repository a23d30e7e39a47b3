//! Case-insensitive filtering of bookmarks against parsed search input.

use crate::types::bookmark::LocalBookmark;
use crate::types::filter::ParsedInputResult;

fn includes(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Whether `bookmark` satisfies every non-empty criterion in `input`.
pub fn filter_bookmark(input: &ParsedInputResult, bookmark: &LocalBookmark) -> bool {
    if !input.name.is_empty() && !includes(&bookmark.title, &input.name) {
        return false;
    }

    if !input.desc.iter().all(|d| includes(&bookmark.desc, d)) {
        return false;
    }

    if !input.url.iter().all(|u| includes(&bookmark.url, u)) {
        return false;
    }

    let tags: Vec<String> = bookmark.tags.iter().map(|t| t.to_lowercase()).collect();
    if !input.tags.iter().all(|t| tags.contains(&t.to_lowercase())) {
        return false;
    }

    let joined_tags = bookmark.tags.join(" ");
    input.wildcard.iter().all(|w| {
        includes(&bookmark.title, w)
            || includes(&bookmark.desc, w)
            || includes(&bookmark.url, w)
            || includes(&joined_tags, w)
    })
}

/// Keeps the bookmarks matching `input`, preserving order.
pub fn filter_bookmarks<'a>(input: &ParsedInputResult, bookmarks: &'a [LocalBookmark]) -> Vec<&'a LocalBookmark> {
    bookmarks
        .iter()
        .filter(|bm| filter_bookmark(input, bm))
        .collect()
}
