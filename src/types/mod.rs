// Shared type definitions.
// Each submodule defines types used across the crate.

pub mod bookmark;
pub mod config;
pub mod errors;
pub mod event;
pub mod filter;
pub mod native;
pub mod outcome;
pub mod staged;
pub mod url_match;
pub mod version;

