//! Decides whether the native host speaks a protocol this crate understands.
//!
//! A host is usable when it is at least the minimum version and on the same
//! major version. Minor and patch releases ahead of the minimum are fine.

use crate::types::version::{HostVersionCheckResult, SemanticVersion};

/// Parses a strict `major.minor.patch` string. Surrounding whitespace is ignored.
pub fn parse_version(raw: &str) -> Option<SemanticVersion> {
    let mut parts = raw.trim().split('.');
    let mut next = || -> Option<u64> {
        let part = parts.next()?;
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        part.parse().ok()
    };
    let version = SemanticVersion {
        major: next()?,
        minor: next()?,
        patch: next()?,
    };
    if parts.next().is_some() {
        return None;
    }
    Some(version)
}

/// Compares the host's reported version against `minimum`.
pub fn compare_against_minimum(minimum: &str, host: &str) -> HostVersionCheckResult {
    let (minimum, host) = match (parse_version(minimum), parse_version(host)) {
        (Some(m), Some(h)) => (m, h),
        _ => return HostVersionCheckResult::UnknownError,
    };

    if host.major > minimum.major {
        HostVersionCheckResult::HostTooNew
    } else if host < minimum {
        HostVersionCheckResult::HostOutdated
    } else {
        HostVersionCheckResult::Okay
    }
}
