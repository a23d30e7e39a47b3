//! Staged Group Manager.
//!
//! Turns a batch of unsaved bookmarks into a [`StagedBookmarksGroup`] and keeps
//! the collection of pending groups in the local store.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::{LocalStore, STAGED_BOOKMARKS_GROUPS_KEY};
use crate::types::bookmark::{LocalBookmark, LocalBookmarkUnsaved};
use crate::types::errors::{StagedGroupError, StorageError};
use crate::types::staged::StagedBookmarksGroup;

/// Source of candidate group identifiers.
pub trait GroupIdSource: Send + Sync {
    fn next_group_id(&self) -> String;
}

/// Random v4 UUIDs.
pub struct UuidGroupIds;

impl GroupIdSource for UuidGroupIds {
    fn next_group_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Draws from a [`GroupIdSource`] before giving up on finding an unused id.
pub const MAX_GROUP_ID_DRAWS: usize = 16;

/// Trait defining staged group operations.
pub trait StagedGroupManagerTrait {
    fn create_group(
        &self,
        existing: &[StagedBookmarksGroup],
        bookmarks: Vec<LocalBookmarkUnsaved>,
    ) -> Result<StagedBookmarksGroup, StagedGroupError>;
    fn load_groups(&self) -> Result<Vec<StagedBookmarksGroup>, StagedGroupError>;
    fn save_groups(&self, groups: &[StagedBookmarksGroup]) -> Result<(), StagedGroupError>;
    fn stage_bookmarks(&self, bookmarks: Vec<LocalBookmarkUnsaved>) -> Result<StagedBookmarksGroup, StagedGroupError>;
    fn find_group(&self, id: &str) -> Result<StagedBookmarksGroup, StagedGroupError>;
    fn remove_group(&self, id: &str) -> Result<StagedBookmarksGroup, StagedGroupError>;
}

/// Staged group manager backed by a [`LocalStore`].
pub struct StagedGroupManager {
    store: Arc<dyn LocalStore>,
    ids: Box<dyn GroupIdSource>,
}

impl StagedGroupManager {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self::with_id_source(store, Box::new(UuidGroupIds))
    }

    pub fn with_id_source(store: Arc<dyn LocalStore>, ids: Box<dyn GroupIdSource>) -> Self {
        Self { store, ids }
    }

    /// Returns the current UNIX timestamp in milliseconds.
    fn now_millis() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }

    fn unique_group_id(&self, existing: &[StagedBookmarksGroup]) -> Result<String, StagedGroupError> {
        for _ in 0..MAX_GROUP_ID_DRAWS {
            let id = self.ids.next_group_id();
            if !existing.iter().any(|g| g.id == id) {
                return Ok(id);
            }
            debug!(%id, "staged group id collided, drawing another");
        }
        Err(StagedGroupError::NoFreeId {
            attempts: MAX_GROUP_ID_DRAWS,
        })
    }
}

impl StagedGroupManagerTrait for StagedGroupManager {
    /// Builds a new group without persisting it.
    ///
    /// Bookmarks are numbered by position, starting at 0.
    fn create_group(
        &self,
        existing: &[StagedBookmarksGroup],
        bookmarks: Vec<LocalBookmarkUnsaved>,
    ) -> Result<StagedBookmarksGroup, StagedGroupError> {
        if bookmarks.is_empty() {
            return Err(StagedGroupError::EmptyBatch);
        }

        let id = self.unique_group_id(existing)?;

        let assigned: Vec<LocalBookmark> = bookmarks
            .into_iter()
            .enumerate()
            .map(|(i, bm)| LocalBookmark::from_unsaved(i as i64, bm))
            .collect();

        Ok(StagedBookmarksGroup {
            id,
            time: Self::now_millis(),
            bookmarks: assigned,
        })
    }

    /// Reads every staged group. Nothing stored yet is an empty collection.
    fn load_groups(&self) -> Result<Vec<StagedBookmarksGroup>, StagedGroupError> {
        match self.store.get(STAGED_BOOKMARKS_GROUPS_KEY)? {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| StagedGroupError::Storage(StorageError::from(e))),
            None => Ok(Vec::new()),
        }
    }

    fn save_groups(&self, groups: &[StagedBookmarksGroup]) -> Result<(), StagedGroupError> {
        let value = serde_json::to_value(groups).map_err(StorageError::from)?;
        self.store.set(&[(STAGED_BOOKMARKS_GROUPS_KEY, value)])?;
        Ok(())
    }

    /// Creates a group from `bookmarks` and appends it to the stored groups.
    fn stage_bookmarks(&self, bookmarks: Vec<LocalBookmarkUnsaved>) -> Result<StagedBookmarksGroup, StagedGroupError> {
        let mut groups = self.load_groups()?;
        let group = self.create_group(&groups, bookmarks)?;
        groups.push(group.clone());
        self.save_groups(&groups)?;

        info!(id = %group.id, bookmarks = group.bookmarks.len(), "staged bookmarks group");
        Ok(group)
    }

    fn find_group(&self, id: &str) -> Result<StagedBookmarksGroup, StagedGroupError> {
        self.load_groups()?
            .into_iter()
            .find(|g| g.id == id)
            .ok_or_else(|| StagedGroupError::NotFound(id.to_string()))
    }

    /// Removes a whole group and returns it.
    fn remove_group(&self, id: &str) -> Result<StagedBookmarksGroup, StagedGroupError> {
        let mut groups = self.load_groups()?;
        let pos = groups
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| StagedGroupError::NotFound(id.to_string()))?;
        let removed = groups.remove(pos);
        self.save_groups(&groups)?;

        info!(id = %removed.id, "removed staged bookmarks group");
        Ok(removed)
    }
}
