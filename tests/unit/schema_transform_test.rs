//! Tests for the mapping between host records and local bookmarks.

use bukubridge::services::schema_transform::{
    transform, transform_unsaved, untransform, untransform_unsaved,
};
use bukubridge::types::bookmark::{
    split_tags, LocalBookmark, LocalBookmarkUnsaved, RemoteBookmark, RemoteBookmarkUnsaved,
};

fn remote(tags: &str) -> RemoteBookmark {
    RemoteBookmark {
        id: 123,
        metadata: "meta".to_string(),
        desc: "".to_string(),
        url: "URL".to_string(),
        tags: tags.to_string(),
        flags: 0,
    }
}

fn local(tags: &[&str]) -> LocalBookmark {
    LocalBookmark {
        id: 123,
        title: "meta".to_string(),
        desc: "".to_string(),
        url: "URL".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        flags: 0,
    }
}

#[test]
fn test_transform_padded_tags() {
    assert_eq!(transform(remote(",1,b,xx,")), local(&["1", "b", "xx"]));
}

#[test]
fn test_transform_legacy_bare_tags() {
    assert_eq!(transform(remote("1,b,xx")), local(&["1", "b", "xx"]));
    assert_eq!(transform(remote("1,b,xx")), transform(remote(",1,b,xx,")));
}

#[test]
fn test_untransform_always_pads() {
    assert_eq!(untransform(local(&["1", "b", "xx"])), remote(",1,b,xx,"));
}

#[test]
fn test_metadata_becomes_title() {
    let mut r = remote(",a,");
    r.metadata = "Rust Book".to_string();
    assert_eq!(transform(r).title, "Rust Book");
}

#[test]
fn test_inner_empty_tags_are_kept() {
    assert_eq!(split_tags("a,,b"), vec!["a", "", "b"]);
    assert_eq!(transform(remote(",a,,b,")).tags, vec!["a", "", "b"]);
}

#[test]
fn test_no_tags() {
    assert!(transform(remote("")).tags.is_empty());
    assert!(transform(remote(",")).tags.is_empty());
    assert_eq!(untransform(local(&[])).tags, ",");
}

#[test]
fn test_unsaved_transforms() {
    let unsaved = RemoteBookmarkUnsaved {
        metadata: "t".to_string(),
        desc: "d".to_string(),
        url: "https://example.com".to_string(),
        tags: "x,y".to_string(),
        flags: 2,
    };
    let local = transform_unsaved(unsaved);
    assert_eq!(
        local,
        LocalBookmarkUnsaved {
            title: "t".to_string(),
            desc: "d".to_string(),
            url: "https://example.com".to_string(),
            tags: vec!["x".to_string(), "y".to_string()],
            flags: 2,
        }
    );
    assert_eq!(untransform_unsaved(local).tags, ",x,y,");
}

#[test]
fn test_local_deserialize_normalizes_legacy_tag_shapes() {
    let from_array: LocalBookmark = serde_json::from_value(serde_json::json!({
        "id": 0, "title": "t", "desc": "", "url": "u", "tags": ["a", "b"], "flags": 0
    }))
    .unwrap();
    assert_eq!(from_array.tags, vec!["a", "b"]);

    // Set-like leftovers persisted as an object
    let from_object: LocalBookmark = serde_json::from_value(serde_json::json!({
        "id": 0, "title": "t", "desc": "", "url": "u", "tags": {"0": "a", "1": "b"}, "flags": 0
    }))
    .unwrap();
    assert_eq!(from_object.tags, vec!["a", "b"]);

    let from_empty_object: LocalBookmark = serde_json::from_str(
        r#"{"id": 0, "title": "t", "desc": "", "url": "u", "tags": {}, "flags": 0}"#,
    )
    .unwrap();
    assert!(from_empty_object.tags.is_empty());

    let from_string: LocalBookmark = serde_json::from_value(serde_json::json!({
        "id": 0, "title": "t", "desc": "", "url": "u", "tags": ",a,b,", "flags": 0
    }))
    .unwrap();
    assert_eq!(from_string.tags, vec!["a", "b"]);

    let from_null: LocalBookmark = serde_json::from_value(serde_json::json!({
        "id": 0, "title": "t", "desc": "", "url": "u", "tags": null, "flags": 0
    }))
    .unwrap();
    assert!(from_null.tags.is_empty());

    let missing: LocalBookmark = serde_json::from_value(serde_json::json!({
        "id": 0, "title": "t", "desc": "", "url": "u", "flags": 0
    }))
    .unwrap();
    assert!(missing.tags.is_empty());
}
