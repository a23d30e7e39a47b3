//! Request/response exchange with the native host.
//!
//! Messages use the browser native messaging framing: a 32-bit length in
//! native byte order followed by that many bytes of UTF-8 JSON.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::process::Command;
use tracing::debug;

use crate::types::errors::NativeError;
use crate::types::native::NativeRequest;

/// Largest frame accepted from the host.
pub const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// Sends one request and yields the host's raw JSON response.
///
/// Implementations must turn every failure into a [`NativeError`]; nothing
/// may panic or hang up on the caller.
#[async_trait]
pub trait NativeTransport: Send + Sync {
    async fn send(&self, request: &NativeRequest) -> Result<Value, NativeError>;
}

/// Serializes `message` into a length-prefixed frame.
pub fn encode_frame<T: Serialize>(message: &T) -> Result<Vec<u8>, NativeError> {
    let body = serde_json::to_vec(message)
        .map_err(|e| NativeError::Transport(format!("failed to encode request: {}", e)))?;
    let len = u32::try_from(body.len())
        .map_err(|_| NativeError::Transport(format!("request too large: {} bytes", body.len())))?;

    let mut frame = Vec::with_capacity(4 + body.len());
    frame.extend_from_slice(&len.to_ne_bytes());
    frame.extend_from_slice(&body);
    Ok(frame)
}

/// Writes `message` as a single frame.
pub async fn write_frame<W, T>(writer: &mut W, message: &T) -> Result<(), NativeError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let frame = encode_frame(message)?;
    writer
        .write_all(&frame)
        .await
        .map_err(|e| NativeError::Transport(format!("failed to write request: {}", e)))?;
    writer
        .flush()
        .await
        .map_err(|e| NativeError::Transport(format!("failed to flush request: {}", e)))
}

/// Reads a single frame and parses its JSON body.
pub async fn read_frame<R>(reader: &mut R) -> Result<Value, NativeError>
where
    R: AsyncRead + Unpin,
{
    let mut len_bytes = [0u8; 4];
    reader
        .read_exact(&mut len_bytes)
        .await
        .map_err(|e| NativeError::Transport(format!("failed to read response length: {}", e)))?;

    let len = u32::from_ne_bytes(len_bytes) as usize;
    if len > MAX_RESPONSE_BYTES {
        return Err(NativeError::Protocol(format!(
            "response of {} bytes exceeds the {} byte limit",
            len, MAX_RESPONSE_BYTES
        )));
    }

    let mut body = vec![0u8; len];
    reader
        .read_exact(&mut body)
        .await
        .map_err(|e| NativeError::Transport(format!("failed to read response body: {}", e)))?;

    serde_json::from_slice(&body).map_err(|e| NativeError::Decode(e.to_string()))
}

/// Launches the host executable for each request, writes the request to its
/// stdin and reads one response frame from its stdout.
pub struct ProcessTransport {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessTransport {
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn program(&self) -> &PathBuf {
        &self.program
    }
}

#[async_trait]
impl NativeTransport for ProcessTransport {
    async fn send(&self, request: &NativeRequest) -> Result<Value, NativeError> {
        debug!(program = %self.program.display(), method = %request.method(), "spawning native host");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => NativeError::HostNotFound(format!(
                    "host not found: {}",
                    self.program.display()
                )),
                _ => NativeError::Transport(format!(
                    "failed to launch {}: {}",
                    self.program.display(),
                    e
                )),
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| NativeError::Transport("host stdin unavailable".to_string()))?;
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| NativeError::Transport("host stdout unavailable".to_string()))?;

        write_frame(&mut stdin, request).await?;
        drop(stdin);

        let response = read_frame(&mut stdout).await?;

        // A failed reap leaves the response intact
        if let Err(e) = child.wait().await {
            debug!(error = %e, "failed to reap native host");
        }

        Ok(response)
    }
}
