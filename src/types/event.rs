/// Notifications emitted to the surrounding application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarksEvent {
    /// The local cache's bookmark collection was overwritten.
    UpdatedInLocalStore { count: usize },
    /// The staged groups collection was overwritten.
    StagedGroupsUpdated { count: usize },
}
