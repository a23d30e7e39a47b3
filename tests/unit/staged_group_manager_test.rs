//! Unit tests for staged bookmark groups.

use bukubridge::database::{LocalStore, MemoryStore, SqliteStore, STAGED_BOOKMARKS_GROUPS_KEY};
use bukubridge::managers::staged_group_manager::{
    GroupIdSource, MAX_GROUP_ID_DRAWS, StagedGroupManager, StagedGroupManagerTrait,
};
use bukubridge::types::bookmark::LocalBookmarkUnsaved;
use bukubridge::types::errors::{StagedGroupError, StorageError};
use serde_json::json;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Hands out a fixed sequence of ids.
struct FixedIds(Mutex<Vec<&'static str>>);

impl FixedIds {
    fn new(ids: &[&'static str]) -> Box<Self> {
        let mut ids = ids.to_vec();
        ids.reverse();
        Box::new(Self(Mutex::new(ids)))
    }
}

impl GroupIdSource for FixedIds {
    fn next_group_id(&self) -> String {
        self.0.lock().unwrap().pop().unwrap_or("exhausted").to_string()
    }
}

fn unsaved(title: &str) -> LocalBookmarkUnsaved {
    LocalBookmarkUnsaved {
        title: title.to_string(),
        desc: String::new(),
        url: format!("https://{}.example.com", title),
        tags: vec!["import".to_string()],
        flags: 0,
    }
}

fn batch(titles: &[&str]) -> Vec<LocalBookmarkUnsaved> {
    titles.iter().map(|t| unsaved(t)).collect()
}

#[test]
fn test_create_group_assigns_distinct_ids_and_keeps_order() {
    let mgr = StagedGroupManager::new(Arc::new(MemoryStore::new()));

    let group = mgr.create_group(&[], batch(&["a", "b", "c"])).unwrap();

    let ids: Vec<i64> = group.bookmarks.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
    let titles: Vec<&str> = group.bookmarks.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "b", "c"]);
    assert!(uuid::Uuid::parse_str(&group.id).is_ok());
    assert!(group.time > 0);
}

#[test]
fn test_create_group_rejects_empty_batch() {
    let mgr = StagedGroupManager::new(Arc::new(MemoryStore::new()));
    assert_eq!(
        mgr.create_group(&[], Vec::new()),
        Err(StagedGroupError::EmptyBatch)
    );
}

#[test]
fn test_group_id_never_collides_with_existing() {
    let store: Arc<dyn LocalStore> = Arc::new(MemoryStore::new());
    let mgr = StagedGroupManager::with_id_source(store, FixedIds::new(&["g1", "g1", "g1", "g2"]));

    let first = mgr.stage_bookmarks(batch(&["a"])).unwrap();
    let second = mgr.stage_bookmarks(batch(&["b"])).unwrap();

    assert_eq!(first.id, "g1");
    assert_eq!(second.id, "g2");
}

/// Always hands out the same id and counts how often it was asked.
struct StuckIds(Arc<AtomicUsize>);

impl GroupIdSource for StuckIds {
    fn next_group_id(&self) -> String {
        self.0.fetch_add(1, Ordering::SeqCst);
        "stuck".to_string()
    }
}

#[test]
fn test_id_source_stuck_on_taken_id_gives_up() {
    let draws = Arc::new(AtomicUsize::new(0));
    let store: Arc<dyn LocalStore> = Arc::new(MemoryStore::new());
    let mgr = StagedGroupManager::with_id_source(store, Box::new(StuckIds(draws.clone())));

    let first = mgr.stage_bookmarks(batch(&["a"])).unwrap();
    assert_eq!(first.id, "stuck");

    let result = mgr.stage_bookmarks(batch(&["b"]));

    assert_eq!(
        result,
        Err(StagedGroupError::NoFreeId {
            attempts: MAX_GROUP_ID_DRAWS
        })
    );
    assert_eq!(draws.load(Ordering::SeqCst), 1 + MAX_GROUP_ID_DRAWS);
    assert_eq!(mgr.load_groups().unwrap(), vec![first]);
}

#[test]
fn test_large_batch_is_numbered_by_position() {
    let mgr = StagedGroupManager::new(Arc::new(MemoryStore::new()));
    let titles: Vec<String> = (0..500).map(|i| format!("b{}", i)).collect();
    let refs: Vec<&str> = titles.iter().map(String::as_str).collect();

    let group = mgr.create_group(&[], batch(&refs)).unwrap();

    for (i, bookmark) in group.bookmarks.iter().enumerate() {
        assert_eq!(bookmark.id, i as i64);
        assert_eq!(bookmark.title, titles[i]);
    }
}

#[test]
fn test_two_batches_make_two_distinct_groups() {
    let mgr = StagedGroupManager::new(Arc::new(SqliteStore::open_in_memory().unwrap()));

    let first = mgr.stage_bookmarks(batch(&["a", "b"])).unwrap();
    let second = mgr.stage_bookmarks(batch(&["c", "d", "e"])).unwrap();
    assert_ne!(first.id, second.id);

    let groups = mgr.load_groups().unwrap();
    assert_eq!(groups, vec![first, second]);
    for group in &groups {
        let ids: HashSet<i64> = group.bookmarks.iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), group.bookmarks.len());
    }
}

#[test]
fn test_load_groups_empty_when_nothing_stored() {
    let mgr = StagedGroupManager::new(Arc::new(MemoryStore::new()));
    assert!(mgr.load_groups().unwrap().is_empty());
}

#[test]
fn test_load_groups_normalizes_legacy_tags() {
    let store = Arc::new(MemoryStore::new());
    store
        .set(&[(
            STAGED_BOOKMARKS_GROUPS_KEY,
            json!([{
                "id": "legacy",
                "time": 1,
                "bookmarks": [{
                    "id": 0, "title": "t", "desc": "", "url": "https://a.com",
                    "tags": {"0": "x"}, "flags": 0
                }]
            }]),
        )])
        .unwrap();
    let mgr = StagedGroupManager::new(store);

    let group = mgr.find_group("legacy").unwrap();
    assert_eq!(group.bookmarks[0].tags, vec!["x"]);
}

#[test]
fn test_remove_group_is_whole() {
    let store: Arc<dyn LocalStore> = Arc::new(MemoryStore::new());
    let mgr = StagedGroupManager::with_id_source(store, FixedIds::new(&["g1", "g2"]));
    mgr.stage_bookmarks(batch(&["a", "b"])).unwrap();
    mgr.stage_bookmarks(batch(&["c"])).unwrap();

    let removed = mgr.remove_group("g1").unwrap();
    assert_eq!(removed.bookmarks.len(), 2);

    let remaining: Vec<String> = mgr.load_groups().unwrap().into_iter().map(|g| g.id).collect();
    assert_eq!(remaining, vec!["g2"]);

    assert_eq!(
        mgr.remove_group("g1"),
        Err(StagedGroupError::NotFound("g1".to_string()))
    );
}

#[test]
fn test_stage_reports_persistence_failure() {
    let store = Arc::new(MemoryStore::new());
    let mgr = StagedGroupManager::new(store.clone());

    store.fail_next_write();
    let result = mgr.stage_bookmarks(batch(&["a"]));

    assert!(matches!(
        result,
        Err(StagedGroupError::Storage(StorageError::DatabaseError(_)))
    ));
    assert!(mgr.load_groups().unwrap().is_empty());
}
