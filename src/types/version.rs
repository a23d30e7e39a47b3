use serde::{Deserialize, Serialize};

/// Outcome of comparing the native host's version against the minimum this
/// crate speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostVersionCheckResult {
    Okay,
    HostOutdated,
    HostTooNew,
    /// The host could not be reached at all (not installed or not registered).
    NoComms,
    UnknownError,
}

impl HostVersionCheckResult {
    pub fn is_okay(self) -> bool {
        self == HostVersionCheckResult::Okay
    }
}

/// A parsed `major.minor.patch` version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}
