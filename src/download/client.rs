//! HTTP client wrapper for streaming stream URLs to disk.
//!
//! This module provides the `HttpClient` struct which handles resumable,
//! chunked downloads with progress reporting.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use indicatif::ProgressBar;
use reqwest::Client;
use reqwest::StatusCode;
use reqwest::header::{COOKIE, RANGE};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::error::DownloadError;
use super::progress::{ProgressMode, transfer_bar};
use crate::http_client::{ClientPolicy, build_http_client};
use crate::user_agent;

/// Default number of bytes written per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// HTTP client for downloading stream URLs with resume support.
///
/// This client is designed to be created once and reused for every file in
/// a run, taking advantage of connection pooling.
///
/// # Example
///
/// ```no_run
/// use std::collections::BTreeMap;
/// use std::path::Path;
/// use videoloader_core::download::{DEFAULT_CHUNK_SIZE, HttpClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new()?;
/// let outcome = client
///     .download(
///         "https://host/videoplayback?id=1",
///         &BTreeMap::new(),
///         Path::new("clip.mp4"),
///         DEFAULT_CHUNK_SIZE,
///     )
///     .await?;
/// println!("wrote {} bytes", outcome.bytes_written);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    progress: ProgressMode,
}

/// What one [`HttpClient::download`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    /// Output path.
    pub path: PathBuf,
    /// Bytes that were already on disk before the call.
    pub existing_bytes: u64,
    /// Bytes received and written by this call.
    pub bytes_written: u64,
    /// Whether the server answered with 206 Partial Content.
    pub partial_content: bool,
    /// Declared content length plus existing bytes, when the server sent a length.
    pub total_bytes: Option<u64>,
}

impl HttpClient {
    /// Creates a client with progress bars hidden.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, DownloadError> {
        // Gzip stays off: byte offsets for Range must refer to the stored bytes.
        let policy = ClientPolicy {
            name: "stream",
            gzip: false,
        };
        let client = build_http_client(policy, &user_agent::default_user_agent())
            .map_err(DownloadError::ClientBuild)?;
        Ok(Self {
            client,
            progress: ProgressMode::Hidden,
        })
    }

    /// Sets how transfer progress is displayed.
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressMode) -> Self {
        self.progress = progress;
        self
    }

    /// Streams `url` into `path`, resuming from any bytes already there.
    ///
    /// When `path` exists and is non-empty, a `Range: bytes=<len>-` request
    /// is sent and received bytes are appended. The server is trusted to
    /// honor the range; no checksum is verified.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - `chunk_size` is zero or the URL is invalid
    /// - the request fails (network error)
    /// - the server returns a status other than 200 or 206; the file is left untouched
    /// - opening or writing the file fails
    #[instrument(skip(self, cookies), fields(url = %url, path = %path.display()))]
    pub async fn download(
        &self,
        url: &str,
        cookies: &BTreeMap<String, String>,
        path: &Path,
        chunk_size: usize,
    ) -> Result<DownloadOutcome, DownloadError> {
        if chunk_size == 0 {
            return Err(DownloadError::InvalidChunkSize);
        }
        Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;

        let existing_bytes = tokio::fs::metadata(path)
            .await
            .map(|meta| meta.len())
            .unwrap_or(0);

        let mut request = self.client.get(url);
        if !cookies.is_empty() {
            request = request.header(COOKIE, cookie_header(cookies));
        }
        if existing_bytes > 0 {
            info!(offset = existing_bytes, "resuming download");
            request = request.header(RANGE, format!("bytes={existing_bytes}-"));
        } else {
            debug!("starting download");
        }

        let response = request
            .send()
            .await
            .map_err(|e| DownloadError::network(url, e))?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::PARTIAL_CONTENT {
            return Err(DownloadError::unexpected_status(url, status.as_u16()));
        }
        if existing_bytes > 0 && status == StatusCode::OK {
            warn!(
                offset = existing_bytes,
                "server ignored the range request; appending full content"
            );
        }

        let total_bytes = response
            .content_length()
            .map(|remaining| remaining.saturating_add(existing_bytes));
        let file = open_output(path, existing_bytes > 0).await?;

        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        let bar = transfer_bar(self.progress, total_bytes, existing_bytes, &name);

        let mut writer = BufWriter::new(file);
        let streamed = stream_to_file(&mut writer, response, chunk_size, &bar, url, path).await;
        // Flush even on a failed stream so the bytes received count toward the next resume.
        let flushed = writer
            .flush()
            .await
            .map_err(|e| DownloadError::io(path, e));

        let bytes_written = match (streamed, flushed) {
            (Ok(written), Ok(())) => written,
            (Err(e), _) | (Ok(_), Err(e)) => {
                bar.abandon();
                return Err(e);
            }
        };
        bar.finish();

        info!(
            path = %path.display(),
            bytes = existing_bytes.saturating_add(bytes_written),
            resumed = status == StatusCode::PARTIAL_CONTENT,
            "downloaded successfully"
        );

        Ok(DownloadOutcome {
            path: path.to_path_buf(),
            existing_bytes,
            bytes_written,
            partial_content: status == StatusCode::PARTIAL_CONTENT,
            total_bytes,
        })
    }
}

async fn open_output(path: &Path, append: bool) -> Result<File, DownloadError> {
    let opened = if append {
        OpenOptions::new().create(true).append(true).open(path).await
    } else {
        File::create(path).await
    };
    opened.map_err(|e| DownloadError::io(path, e))
}

/// Writes the response body in pieces of at most `chunk_size` bytes, returning bytes written.
async fn stream_to_file(
    writer: &mut BufWriter<File>,
    response: reqwest::Response,
    chunk_size: usize,
    bar: &ProgressBar,
    url: &str,
    path: &Path,
) -> Result<u64, DownloadError> {
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::network(url, e))?;
        for piece in chunk.chunks(chunk_size) {
            writer
                .write_all(piece)
                .await
                .map_err(|e| DownloadError::io(path, e))?;
            let len = piece.len() as u64;
            bytes_written += len;
            bar.inc(len);
        }
    }

    Ok(bytes_written)
}

/// Renders cookies as a single `Cookie` header value.
fn cookie_header(cookies: &BTreeMap<String, String>) -> String {
    cookies
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("; ")
}
