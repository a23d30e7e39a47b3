use serde::{Deserialize, Serialize};

use super::bookmark::LocalBookmark;

/// One pending bulk import awaiting review.
///
/// Created once and never edited; it is either committed or discarded whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedBookmarksGroup {
    pub id: String,
    /// Creation time in epoch milliseconds.
    pub time: i64,
    pub bookmarks: Vec<LocalBookmark>,
}
