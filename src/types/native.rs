use serde::{Deserialize, Serialize};
use std::fmt;

use super::bookmark::{RemoteBookmark, RemoteBookmarkUnsaved};

/// Methods understood by the native host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeRequestMethod {
    Get,
    Options,
    Post,
    Put,
    Delete,
}

impl NativeRequestMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            NativeRequestMethod::Get => "GET",
            NativeRequestMethod::Options => "OPTIONS",
            NativeRequestMethod::Post => "POST",
            NativeRequestMethod::Put => "PUT",
            NativeRequestMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for NativeRequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRequestData {
    pub offset: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRequestData {
    pub bookmarks: Vec<RemoteBookmarkUnsaved>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutRequestData {
    pub bookmarks: Vec<RemoteBookmark>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequestData {
    pub bookmark_ids: Vec<i64>,
}

/// One request to the native host.
///
/// Serializes as `{"method": "GET", "data": {...}}`; `OPTIONS` carries no `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "data")]
pub enum NativeRequest {
    #[serde(rename = "GET")]
    Get(GetRequestData),
    #[serde(rename = "OPTIONS")]
    Options,
    #[serde(rename = "POST")]
    Post(PostRequestData),
    #[serde(rename = "PUT")]
    Put(PutRequestData),
    #[serde(rename = "DELETE")]
    Delete(DeleteRequestData),
}

impl NativeRequest {
    pub fn method(&self) -> NativeRequestMethod {
        match self {
            NativeRequest::Get(_) => NativeRequestMethod::Get,
            NativeRequest::Options => NativeRequestMethod::Options,
            NativeRequest::Post(_) => NativeRequestMethod::Post,
            NativeRequest::Put(_) => NativeRequestMethod::Put,
            NativeRequest::Delete(_) => NativeRequestMethod::Delete,
        }
    }
}

/// Response to `GET`. `bookmarks` and `more_available` are only present when
/// `success` is true; `message` only when it is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookmarks: Option<Vec<RemoteBookmark>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more_available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response to `OPTIONS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary_version: Option<String>,
}

/// Response to `POST`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

/// Response to `PUT` and `DELETE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub success: bool,
}

/// One page of remote bookmarks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkPage {
    pub bookmarks: Vec<RemoteBookmark>,
    pub more_available: bool,
}
