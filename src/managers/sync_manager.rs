//! Sync Manager.
//!
//! The read/write surface the rest of the application uses. Reads flow
//! host → transform → local cache; writes go to the host first and the local
//! cache is updated once the host accepts them.
//!
//! Overlapping writes are not serialized here. The local cache is last
//! writer wins, so callers must not race two writes to the same key.

use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{info, warn};
use url::Url;

use crate::database::{LocalStore, BOOKMARKS_KEY, BOOKMARKS_SCHEMA_VERSION_KEY};
use crate::managers::staged_group_manager::{
    GroupIdSource, StagedGroupManager, StagedGroupManagerTrait,
};
use crate::services::bookmark_filter;
use crate::services::native_client::{NativeClient, NativeClientTrait};
use crate::services::native_transport::NativeTransport;
use crate::services::schema_transform::{transform, untransform, untransform_unsaved};
use crate::services::url_matcher;
use crate::types::bookmark::{LocalBookmark, LocalBookmarkUnsaved};
use crate::types::config::SyncConfig;
use crate::types::errors::{NativeError, StorageError, SyncError};
use crate::types::event::BookmarksEvent;
use crate::types::filter::ParsedInputResult;
use crate::types::outcome::RemoteWrite;
use crate::types::staged::StagedBookmarksGroup;
use crate::types::url_match::URLMatch;
use crate::types::version::HostVersionCheckResult;

const EVENT_CAPACITY: usize = 16;

pub struct SyncManager {
    client: NativeClient,
    store: Arc<dyn LocalStore>,
    staged: StagedGroupManager,
    schema_version: i64,
    events: broadcast::Sender<BookmarksEvent>,
}

impl SyncManager {
    pub fn new(client: NativeClient, store: Arc<dyn LocalStore>, schema_version: i64) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            client,
            staged: StagedGroupManager::new(Arc::clone(&store)),
            store,
            schema_version,
            events,
        }
    }

    /// Wires a manager from configuration.
    pub fn from_config(
        config: &SyncConfig,
        transport: Arc<dyn NativeTransport>,
        store: Arc<dyn LocalStore>,
    ) -> Self {
        let client = NativeClient::new(transport, config.minimum_binary_version.clone());
        Self::new(client, store, config.bookmarks_schema_version)
    }

    /// Replaces the staged group id source, e.g. with a deterministic one in tests.
    pub fn with_group_ids(mut self, ids: Box<dyn GroupIdSource>) -> Self {
        self.staged = StagedGroupManager::with_id_source(Arc::clone(&self.store), ids);
        self
    }

    /// Receives a notification after every successful local write.
    pub fn subscribe(&self) -> broadcast::Receiver<BookmarksEvent> {
        self.events.subscribe()
    }

    pub fn client(&self) -> &NativeClient {
        &self.client
    }

    pub fn staged(&self) -> &StagedGroupManager {
        &self.staged
    }

    fn notify(&self, event: BookmarksEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    // ─── Host ───

    pub async fn check_host(&self) -> HostVersionCheckResult {
        self.client.check_version().await
    }

    /// Fetches every remote bookmark in local shape. Touches nothing locally.
    pub async fn load_all_bookmarks(&self) -> Result<Vec<LocalBookmark>, SyncError> {
        let remote = self.client.fetch_all().await?;
        Ok(remote.into_iter().map(transform).collect())
    }

    /// Gates on the host version, then replaces the local cache with the
    /// host's collection.
    pub async fn sync_from_remote(&self) -> Result<Vec<LocalBookmark>, SyncError> {
        ensure_usable(self.check_host().await)?;
        self.refresh_from_remote().await
    }

    async fn refresh_from_remote(&self) -> Result<Vec<LocalBookmark>, SyncError> {
        let bookmarks = self.load_all_bookmarks().await?;
        self.persist_bookmarks_locally(&bookmarks)?;
        Ok(bookmarks)
    }

    // ─── Local cache ───

    /// Overwrites the cached bookmarks together with their schema version tag.
    pub fn persist_bookmarks_locally(&self, bookmarks: &[LocalBookmark]) -> Result<(), SyncError> {
        let value = serde_json::to_value(bookmarks).map_err(StorageError::from)?;
        self.store.set(&[
            (BOOKMARKS_KEY, value),
            (BOOKMARKS_SCHEMA_VERSION_KEY, serde_json::json!(self.schema_version)),
        ])?;

        info!(count = bookmarks.len(), "persisted bookmarks locally");
        self.notify(BookmarksEvent::UpdatedInLocalStore {
            count: bookmarks.len(),
        });
        Ok(())
    }

    /// Reads the cached bookmarks.
    ///
    /// `None` when nothing usable is cached: no data, an empty collection, or
    /// data written under a different schema version.
    pub fn load_local_bookmarks(&self) -> Result<Option<Vec<LocalBookmark>>, SyncError> {
        let stored_version = self
            .store
            .get(BOOKMARKS_SCHEMA_VERSION_KEY)?
            .and_then(|v| v.as_i64());
        if stored_version != Some(self.schema_version) {
            warn!(
                ?stored_version,
                expected = self.schema_version,
                "bookmark schema versions don't match, ignoring local cache"
            );
            return Ok(None);
        }

        let bookmarks: Vec<LocalBookmark> = match self.store.get(BOOKMARKS_KEY)? {
            Some(value) => serde_json::from_value(value).map_err(StorageError::from)?,
            None => return Ok(None),
        };

        if bookmarks.is_empty() {
            return Ok(None);
        }
        Ok(Some(bookmarks))
    }

    /// [`Self::load_local_bookmarks`] with every failure read as "no bookmarks".
    pub fn load_local_bookmarks_or_empty(&self) -> Vec<LocalBookmark> {
        match self.load_local_bookmarks() {
            Ok(Some(bookmarks)) => bookmarks,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to read local bookmarks");
                Vec::new()
            }
        }
    }

    /// Cached bookmarks matching `input`.
    pub fn search(&self, input: &ParsedInputResult) -> Vec<LocalBookmark> {
        let bookmarks = self.load_local_bookmarks_or_empty();
        bookmark_filter::filter_bookmarks(input, &bookmarks)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Cached bookmarks resembling `url`, best match first.
    pub fn bookmarks_matching_url(&self, url: &str) -> Vec<(URLMatch, LocalBookmark)> {
        let Ok(url) = Url::parse(url) else {
            return Vec::new();
        };
        let bookmarks = self.load_local_bookmarks_or_empty();
        url_matcher::rank_by_match(&url, &bookmarks)
            .into_iter()
            .map(|(m, bm)| (m, bm.clone()))
            .collect()
    }

    // ─── Remote writes ───

    /// Inserts bookmarks on the host, then reloads the cache so the ids the
    /// host assigned are visible. The value is the id the host reported, if any.
    pub async fn add_bookmarks(
        &self,
        bookmarks: Vec<LocalBookmarkUnsaved>,
    ) -> Result<RemoteWrite<Option<i64>>, SyncError> {
        let remote = bookmarks.into_iter().map(untransform_unsaved).collect();
        let id = self.client.save_bookmarks(remote).await?;

        let local_update = self.refresh_from_remote().await.map(|_| ());
        Ok(self.accepted(id, local_update))
    }

    /// Updates bookmarks on the host, then swaps them into the cache by id.
    pub async fn update_bookmarks(&self, bookmarks: Vec<LocalBookmark>) -> Result<RemoteWrite<()>, SyncError> {
        let remote = bookmarks.iter().cloned().map(untransform).collect();
        self.client.update_bookmarks(remote).await?;

        let local_update = self
            .patch_cache(|cached| {
                for updated in bookmarks {
                    if let Some(slot) = cached.iter_mut().find(|b| b.id == updated.id) {
                        *slot = updated;
                    }
                }
            })
            .await;
        Ok(self.accepted((), local_update))
    }

    /// Deletes bookmarks on the host, then drops them from the cache.
    pub async fn delete_bookmarks(&self, ids: Vec<i64>) -> Result<RemoteWrite<()>, SyncError> {
        self.client.delete_bookmarks(ids.clone()).await?;

        let local_update = self
            .patch_cache(|cached| cached.retain(|b| !ids.contains(&b.id)))
            .await;
        Ok(self.accepted((), local_update))
    }

    /// Applies `edit` to the cached bookmarks, or reloads them from the host
    /// when nothing usable is cached.
    async fn patch_cache<F>(&self, edit: F) -> Result<(), SyncError>
    where
        F: FnOnce(&mut Vec<LocalBookmark>),
    {
        match self.load_local_bookmarks()? {
            Some(mut cached) => {
                edit(&mut cached);
                self.persist_bookmarks_locally(&cached)
            }
            None => self.refresh_from_remote().await.map(|_| ()),
        }
    }

    fn accepted<T>(&self, value: T, local_update: Result<(), SyncError>) -> RemoteWrite<T> {
        if let Err(e) = &local_update {
            warn!(error = %e, "native host accepted the write but the local update failed");
        }
        RemoteWrite {
            value,
            local_update,
        }
    }

    // ─── Staged groups ───

    pub fn staged_groups(&self) -> Result<Vec<StagedBookmarksGroup>, SyncError> {
        Ok(self.staged.load_groups()?)
    }

    /// Buffers a bulk import for review.
    pub fn stage_bookmarks(&self, bookmarks: Vec<LocalBookmarkUnsaved>) -> Result<StagedBookmarksGroup, SyncError> {
        let group = self.staged.stage_bookmarks(bookmarks)?;
        self.notify_staged_groups();
        Ok(group)
    }

    /// Drops a staged group without saving any of it.
    pub fn discard_staged_group(&self, id: &str) -> Result<StagedBookmarksGroup, SyncError> {
        let group = self.staged.remove_group(id)?;
        self.notify_staged_groups();
        Ok(group)
    }

    /// Sends a staged group to the host as one insert and removes it once the
    /// host accepts it.
    ///
    /// `Err` means the host did not take the group and it stays staged, whole.
    /// Once the host has taken it, the outcome is `Ok` and failures to drop
    /// the group or refresh the cache are reported in `local_update`.
    pub async fn commit_staged_group(&self, id: &str) -> Result<RemoteWrite<StagedBookmarksGroup>, SyncError> {
        let group = self.staged.find_group(id)?;
        let remote = group
            .bookmarks
            .iter()
            .cloned()
            .map(|bm| untransform_unsaved(bm.into_unsaved()))
            .collect();
        self.client.save_bookmarks(remote).await?;
        info!(%id, bookmarks = group.bookmarks.len(), "committed staged group");

        let local_update = match self.staged.remove_group(id) {
            Ok(_) => {
                self.notify_staged_groups();
                self.refresh_from_remote().await.map(|_| ())
            }
            Err(e) => Err(e.into()),
        };
        Ok(self.accepted(group, local_update))
    }

    fn notify_staged_groups(&self) {
        match self.staged.load_groups() {
            Ok(groups) => self.notify(BookmarksEvent::StagedGroupsUpdated {
                count: groups.len(),
            }),
            Err(e) => warn!(error = %e, "failed to re-read staged groups"),
        }
    }
}

/// Turns a version check verdict into the error `sync_from_remote` reports.
///
/// Only a version outside the supported range is `Incompatible`; a missing
/// host or an unreadable answer are native errors.
pub fn ensure_usable(verdict: HostVersionCheckResult) -> Result<(), SyncError> {
    match verdict {
        HostVersionCheckResult::Okay => Ok(()),
        HostVersionCheckResult::HostOutdated | HostVersionCheckResult::HostTooNew => {
            warn!(?verdict, "refusing to sync with native host");
            Err(SyncError::Incompatible(verdict))
        }
        HostVersionCheckResult::NoComms => Err(SyncError::Native(NativeError::HostNotFound(
            "no response to the version check".to_string(),
        ))),
        HostVersionCheckResult::UnknownError => Err(SyncError::Native(NativeError::Protocol(
            "native host version could not be determined".to_string(),
        ))),
    }
}
