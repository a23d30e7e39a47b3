// State managers
// Managers own operations over the local store: staged groups and the sync facade.

pub mod staged_group_manager;
pub mod sync_manager;
