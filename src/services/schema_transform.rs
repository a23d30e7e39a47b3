//! Mapping between the native host's wire records and local bookmarks.
//!
//! The two directions are not a strict round trip: reading accepts both the
//! bare (`"a,b"`) and padded (`",a,b,"`) tag forms, writing always emits the
//! padded one.

use crate::types::bookmark::{
    join_tags, split_tags, LocalBookmark, LocalBookmarkUnsaved, RemoteBookmark,
    RemoteBookmarkUnsaved,
};

/// Converts a remote record into its local shape.
pub fn transform(remote: RemoteBookmark) -> LocalBookmark {
    LocalBookmark {
        id: remote.id,
        title: remote.metadata,
        desc: remote.desc,
        url: remote.url,
        tags: split_tags(&remote.tags),
        flags: remote.flags,
    }
}

/// Converts a local bookmark into the wire shape.
pub fn untransform(local: LocalBookmark) -> RemoteBookmark {
    RemoteBookmark {
        id: local.id,
        metadata: local.title,
        desc: local.desc,
        url: local.url,
        tags: join_tags(&local.tags),
        flags: local.flags,
    }
}

pub fn transform_unsaved(remote: RemoteBookmarkUnsaved) -> LocalBookmarkUnsaved {
    LocalBookmarkUnsaved {
        title: remote.metadata,
        desc: remote.desc,
        url: remote.url,
        tags: split_tags(&remote.tags),
        flags: remote.flags,
    }
}

pub fn untransform_unsaved(local: LocalBookmarkUnsaved) -> RemoteBookmarkUnsaved {
    RemoteBookmarkUnsaved {
        metadata: local.title,
        desc: local.desc,
        url: local.url,
        tags: join_tags(&local.tags),
        flags: local.flags,
    }
}
