//! Typed client for the native host protocol.
//!
//! Builds on a [`NativeTransport`] and adds response decoding, pagination
//! and the host version check. It never retries on its own; what to do after
//! a failed call or an incompatible host is the caller's decision.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::services::native_transport::NativeTransport;
use crate::services::version_gate;
use crate::types::bookmark::{RemoteBookmark, RemoteBookmarkUnsaved};
use crate::types::errors::NativeError;
use crate::types::native::{
    BookmarkPage, DeleteRequestData, GetRequestData, GetResponse, NativeRequest,
    NativeRequestMethod, OptionsResponse, PostRequestData, PostResponse, PutRequestData,
    StatusResponse,
};
use crate::types::version::HostVersionCheckResult;

/// Trait defining the operations offered by the native host.
#[async_trait::async_trait]
pub trait NativeClientTrait: Send + Sync {
    async fn get_page(&self, offset: u64) -> Result<BookmarkPage, NativeError>;
    async fn fetch_all(&self) -> Result<Vec<RemoteBookmark>, NativeError>;
    async fn check_version(&self) -> HostVersionCheckResult;
    async fn save_bookmarks(&self, bookmarks: Vec<RemoteBookmarkUnsaved>) -> Result<Option<i64>, NativeError>;
    async fn update_bookmarks(&self, bookmarks: Vec<RemoteBookmark>) -> Result<(), NativeError>;
    async fn delete_bookmarks(&self, ids: Vec<i64>) -> Result<(), NativeError>;
}

/// Native host client over a shared transport.
pub struct NativeClient {
    transport: Arc<dyn NativeTransport>,
    minimum_binary_version: String,
}

impl NativeClient {
    pub fn new(transport: Arc<dyn NativeTransport>, minimum_binary_version: impl Into<String>) -> Self {
        Self {
            transport,
            minimum_binary_version: minimum_binary_version.into(),
        }
    }

    pub fn minimum_binary_version(&self) -> &str {
        &self.minimum_binary_version
    }

    /// Sends one request on its own task.
    ///
    /// A transport that panics surfaces as `NativeError::Transport`. Dropping
    /// the returned future does not cancel the request already in flight.
    async fn send(&self, request: NativeRequest) -> Result<Value, NativeError> {
        let method = request.method();
        debug!(%method, "sending native request");

        let transport = Arc::clone(&self.transport);
        let handle = tokio::spawn(async move { transport.send(&request).await });

        match handle.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                warn!(%method, error = %e, "native request failed");
                Err(e)
            }
            Err(join_err) => {
                warn!(%method, error = %join_err, "native transport aborted");
                Err(NativeError::Transport(format!(
                    "{} request aborted: {}",
                    method, join_err
                )))
            }
        }
    }

    fn decode<T: DeserializeOwned>(method: NativeRequestMethod, value: Value) -> Result<T, NativeError> {
        serde_json::from_value(value)
            .map_err(|e| NativeError::Decode(format!("{} response: {}", method, e)))
    }

    fn ensure_success(method: NativeRequestMethod, success: bool) -> Result<(), NativeError> {
        if success {
            Ok(())
        } else {
            Err(NativeError::Protocol(format!("{} reported success: false", method)))
        }
    }
}

#[async_trait::async_trait]
impl NativeClientTrait for NativeClient {
    /// Fetches one page of bookmarks starting at `offset`.
    async fn get_page(&self, offset: u64) -> Result<BookmarkPage, NativeError> {
        let method = NativeRequestMethod::Get;
        let value = self
            .send(NativeRequest::Get(GetRequestData { offset }))
            .await?;
        let res: GetResponse = Self::decode(method, value)?;

        if !res.success {
            return Err(NativeError::Protocol(
                res.message
                    .unwrap_or_else(|| format!("{} reported success: false", method)),
            ));
        }

        let bookmarks = res
            .bookmarks
            .ok_or_else(|| NativeError::Protocol("GET response is missing bookmarks".to_string()))?;
        let more_available = res.more_available.ok_or_else(|| {
            NativeError::Protocol("GET response is missing moreAvailable".to_string())
        })?;

        Ok(BookmarkPage {
            bookmarks,
            more_available,
        })
    }

    /// Pages through the whole remote collection.
    ///
    /// Pages are requested one after another, each at the count received so
    /// far. Any failure discards everything fetched up to that point.
    async fn fetch_all(&self) -> Result<Vec<RemoteBookmark>, NativeError> {
        let mut bookmarks: Vec<RemoteBookmark> = Vec::new();
        let mut pages = 0usize;

        loop {
            let page = self.get_page(bookmarks.len() as u64).await?;
            pages += 1;

            // An empty page that claims more would never advance the offset
            if page.more_available && page.bookmarks.is_empty() {
                return Err(NativeError::Protocol(format!(
                    "host reported more bookmarks after offset {} but returned none",
                    bookmarks.len()
                )));
            }

            bookmarks.extend(page.bookmarks);

            if !page.more_available {
                break;
            }
        }

        info!(pages, total = bookmarks.len(), "fetched bookmarks from native host");
        Ok(bookmarks)
    }

    /// Asks the host for its version and gates on it.
    async fn check_version(&self) -> HostVersionCheckResult {
        let method = NativeRequestMethod::Options;
        let result = match self.send(NativeRequest::Options).await {
            Err(e) if e.is_host_not_found() => HostVersionCheckResult::NoComms,
            Err(_) => HostVersionCheckResult::UnknownError,
            Ok(value) => match Self::decode::<OptionsResponse>(method, value) {
                Ok(OptionsResponse {
                    success: true,
                    binary_version: Some(version),
                }) if !version.is_empty() => {
                    version_gate::compare_against_minimum(&self.minimum_binary_version, &version)
                }
                _ => HostVersionCheckResult::UnknownError,
            },
        };

        info!(?result, minimum = %self.minimum_binary_version, "native host version check");
        result
    }

    /// Inserts bookmarks. Returns the id the host assigned, when it reports one.
    async fn save_bookmarks(&self, bookmarks: Vec<RemoteBookmarkUnsaved>) -> Result<Option<i64>, NativeError> {
        let method = NativeRequestMethod::Post;
        let value = self
            .send(NativeRequest::Post(PostRequestData { bookmarks }))
            .await?;
        let res: PostResponse = Self::decode(method, value)?;
        Self::ensure_success(method, res.success)?;
        Ok(res.id)
    }

    async fn update_bookmarks(&self, bookmarks: Vec<RemoteBookmark>) -> Result<(), NativeError> {
        let method = NativeRequestMethod::Put;
        let value = self
            .send(NativeRequest::Put(PutRequestData { bookmarks }))
            .await?;
        let res: StatusResponse = Self::decode(method, value)?;
        Self::ensure_success(method, res.success)
    }

    async fn delete_bookmarks(&self, ids: Vec<i64>) -> Result<(), NativeError> {
        let method = NativeRequestMethod::Delete;
        let value = self
            .send(NativeRequest::Delete(DeleteRequestData { bookmark_ids: ids }))
            .await?;
        let res: StatusResponse = Self::decode(method, value)?;
        Self::ensure_success(method, res.success)
    }
}
