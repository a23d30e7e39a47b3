use serde::{Deserialize, Serialize};

/// How closely two URLs resemble one another.
///
/// Variants are declared weakest first so the derived ordering ranks
/// `None < Domain < Exact`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum URLMatch {
    None,
    Domain,
    Exact,
}
