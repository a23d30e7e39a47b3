use super::errors::SyncError;

/// Outcome of a write the native host has accepted.
///
/// The host side is done once this exists. `local_update` reports the cache
/// and staged group bookkeeping that follows it; an error there does not
/// undo the remote write, so retrying the write would repeat it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteWrite<T> {
    pub value: T,
    pub local_update: Result<(), SyncError>,
}

impl<T> RemoteWrite<T> {
    /// Whether the local side caught up with the host as well.
    pub fn is_fully_applied(&self) -> bool {
        self.local_update.is_ok()
    }
}
