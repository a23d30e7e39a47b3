use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A bookmark as held in the local cache and shown to the user.
///
/// `id` is unique within the local cache. `0` is a valid id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalBookmark {
    pub id: i64,
    pub title: String,
    pub desc: String,
    pub url: String,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    pub flags: i64,
}

/// A local bookmark that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalBookmarkUnsaved {
    pub title: String,
    pub desc: String,
    pub url: String,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    pub flags: i64,
}

impl LocalBookmark {
    /// Attaches an id to an unsaved bookmark.
    pub fn from_unsaved(id: i64, bookmark: LocalBookmarkUnsaved) -> Self {
        Self {
            id,
            title: bookmark.title,
            desc: bookmark.desc,
            url: bookmark.url,
            tags: bookmark.tags,
            flags: bookmark.flags,
        }
    }

    /// Drops the id, e.g. before re-submitting a staged bookmark to the host.
    pub fn into_unsaved(self) -> LocalBookmarkUnsaved {
        LocalBookmarkUnsaved {
            title: self.title,
            desc: self.desc,
            url: self.url,
            tags: self.tags,
            flags: self.flags,
        }
    }
}

/// Wire shape of a bookmark stored by the native host.
///
/// `metadata` carries the title and `tags` is comma-joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteBookmark {
    pub id: i64,
    pub metadata: String,
    pub desc: String,
    pub url: String,
    pub tags: String,
    pub flags: i64,
}

/// Wire shape of a bookmark the host has not stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteBookmarkUnsaved {
    pub metadata: String,
    pub desc: String,
    pub url: String,
    pub tags: String,
    pub flags: i64,
}

/// Splits a comma-joined tag string, dropping the empty segments that leading
/// and trailing delimiters produce. Inner empty segments are kept.
pub fn split_tags(raw: &str) -> Vec<String> {
    let mut parts: Vec<&str> = raw.split(',').collect();
    if parts.first().is_some_and(|p| p.is_empty()) {
        parts.remove(0);
    }
    if parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }
    parts.into_iter().map(str::to_string).collect()
}

/// Joins tags into the padded wire form, e.g. `",a,b,"`. No tags is `","`.
pub fn join_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        return ",".to_string();
    }
    format!(",{},", tags.join(","))
}

/// Accepts every shape `tags` has been persisted in over time and always
/// yields an ordered sequence.
///
/// - array of strings: kept as-is
/// - object (set-like leftovers): its string values, otherwise its keys
/// - string: split like the wire form
/// - null: empty
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(TagsVisitor)
}

struct TagsVisitor;

impl<'de> Visitor<'de> for TagsVisitor {
    type Value = Vec<String>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a tag sequence, a set-like object, a comma-joined string, or null")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut tags = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(tag) = seq.next_element::<String>()? {
            tags.push(tag);
        }
        Ok(tags)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut tags = Vec::new();
        while let Some((key, value)) = map.next_entry::<String, serde_json::Value>()? {
            match value {
                serde_json::Value::String(s) => tags.push(s),
                _ => tags.push(key),
            }
        }
        Ok(tags)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(split_tags(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }
}
