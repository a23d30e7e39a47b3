use serde::{Deserialize, Serialize};

/// Search criteria parsed from the user's input.
///
/// Every non-empty field narrows the result set further.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedInputResult {
    pub name: String,
    pub desc: Vec<String>,
    pub url: Vec<String>,
    pub tags: Vec<String>,
    pub wildcard: Vec<String>,
}

impl ParsedInputResult {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.desc.is_empty()
            && self.url.is_empty()
            && self.tags.is_empty()
            && self.wildcard.is_empty()
    }
}
