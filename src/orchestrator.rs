//! Per-run pipeline: identifier → info → stream URL → download.
//!
//! Single links abort on an info fetch error. Folder links abort when the
//! folder page cannot be fetched, then process every listed id in order and
//! skip the ones that fail. Within one folder run no two ids share a file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::download::{DEFAULT_CHUNK_SIZE, DownloadError, DownloadOutcome, HttpClient, derive_filename};
use crate::drive::{DriveClient, DriveError};
use crate::parser::{extract_identifier, is_folder_url, locate_stream};

/// Caller-supplied settings for a run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Explicit output path. A file path for single links, a directory for folders.
    pub output: Option<PathBuf>,
    /// Maximum bytes written per chunk.
    pub chunk_size: usize,
    /// Directory for title-derived filenames when no output override is set.
    pub output_dir: PathBuf,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            output: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            output_dir: PathBuf::from("."),
        }
    }
}

/// Counts for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    completed: usize,
    failed: usize,
    no_stream: usize,
}

impl RunSummary {
    /// Returns the number of files downloaded.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Returns the number of ids whose info fetch or download failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Returns the number of ids whose info response had no stream URL.
    #[must_use]
    pub fn no_stream(&self) -> usize {
        self.no_stream
    }

    /// Returns the number of ids processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.completed + self.failed + self.no_stream
    }

    /// Returns the number of ids that did not produce a file.
    #[must_use]
    pub fn unsuccessful(&self) -> usize {
        self.failed + self.no_stream
    }

    fn record(&mut self, result: &Result<ItemOutcome, ItemError>) {
        match result {
            Ok(ItemOutcome::Downloaded(_)) => self.completed += 1,
            Ok(ItemOutcome::NoStream) => self.no_stream += 1,
            Err(_) => self.failed += 1,
        }
    }
}

/// Result of processing one id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// The stream was saved.
    Downloaded(DownloadOutcome),
    /// The info response carried no stream URL; nothing was downloaded.
    NoStream,
}

/// Failure while processing one id.
#[derive(Debug, Error)]
pub enum ItemError {
    /// The info endpoint could not be fetched.
    #[error("error fetching video info: {0}")]
    Info(#[from] DriveError),

    /// The stream could not be saved.
    #[error("error downloading stream: {0}")]
    Download(#[from] DownloadError),
}

/// Failures that end a run early.
#[derive(Debug, Error)]
pub enum RunError {
    /// The info fetch for a single link failed.
    #[error("error fetching video info for {id}: {source}")]
    Fetch {
        /// The file id.
        id: String,
        /// The underlying request error.
        #[source]
        source: DriveError,
    },

    /// The folder page could not be fetched.
    #[error("error fetching folder {url}: {source}")]
    Folder {
        /// The folder URL.
        url: String,
        /// The underlying request error.
        #[source]
        source: DriveError,
    },

    /// The folder output directory could not be created.
    #[error("cannot create output directory {path}: {source}")]
    OutputDir {
        /// The directory path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Runs the resolve → fetch → locate → download pipeline.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    drive: DriveClient,
    http: HttpClient,
    options: RunOptions,
}

impl Orchestrator {
    /// Creates an orchestrator from its clients and options.
    #[must_use]
    pub fn new(drive: DriveClient, http: HttpClient, options: RunOptions) -> Self {
        Self {
            drive,
            http,
            options,
        }
    }

    /// Processes a share link, folder link, or raw id.
    ///
    /// # Errors
    ///
    /// Returns [`RunError`] when a single link's info fetch fails, a folder
    /// page cannot be fetched, or a folder's output directory cannot be
    /// created. Per-id failures inside
    /// a folder are logged and counted instead.
    pub async fn run(&self, input: &str) -> Result<RunSummary, RunError> {
        if is_folder_url(input) {
            info!(url = input, "detected folder URL, extracting data-ids");
            self.run_folder(input).await
        } else {
            self.run_single(input).await
        }
    }

    /// Lists the ids on a folder page without downloading anything.
    ///
    /// # Errors
    ///
    /// Returns [`DriveError`] when the page cannot be fetched.
    pub async fn list_ids(&self, url: &str) -> Result<Vec<String>, DriveError> {
        self.drive.try_list_folder(url).await
    }

    async fn run_single(&self, input: &str) -> Result<RunSummary, RunError> {
        let id = extract_identifier(input);
        info!(id = %id, "extracted video ID");

        let mut summary = RunSummary::default();
        let result = match self
            .process_identifier(&id, &self.options.output_dir, self.options.output.as_deref())
            .await
        {
            Err(ItemError::Info(source)) => return Err(RunError::Fetch { id, source }),
            other => other,
        };
        if let Err(e) = &result {
            error!(id = %id, error = %e, "download failed");
        }
        summary.record(&result);
        Ok(summary)
    }

    async fn run_folder(&self, url: &str) -> Result<RunSummary, RunError> {
        let mut summary = RunSummary::default();
        let ids = self
            .drive
            .try_list_folder(url)
            .await
            .map_err(|source| RunError::Folder {
                url: url.to_string(),
                source,
            })?;
        if ids.is_empty() {
            warn!("no data-ids found in folder URL");
            return Ok(summary);
        }

        let dir = self
            .options
            .output
            .clone()
            .unwrap_or_else(|| self.options.output_dir.clone());
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| RunError::OutputDir {
                path: dir.clone(),
                source,
            })?;

        // Paths handed out during this run; a second id never resumes into one.
        let mut claimed = HashSet::new();
        let count = ids.len();
        for (idx, id) in ids.iter().enumerate() {
            info!(item = idx + 1, total = count, id = %id, "processing id");
            let result = self.process_into(id, &dir, None, &mut claimed).await;
            match &result {
                Err(ItemError::Info(e)) => {
                    error!(id = %id, error = %e, "error accessing video info; skipping");
                }
                Err(ItemError::Download(e)) => {
                    error!(id = %id, error = %e, "download failed; skipping");
                }
                Ok(_) => {}
            }
            summary.record(&result);
        }

        info!(
            completed = summary.completed(),
            failed = summary.failed(),
            no_stream = summary.no_stream(),
            total = summary.total(),
            "folder complete"
        );
        Ok(summary)
    }

    /// Fetches, parses, and downloads one id.
    ///
    /// The file is written to `file_override` when given, otherwise to a
    /// title-derived name inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError`] when the info fetch or the download fails.
    pub async fn process_identifier(
        &self,
        id: &str,
        dir: &Path,
        file_override: Option<&Path>,
    ) -> Result<ItemOutcome, ItemError> {
        self.process_into(id, dir, file_override, &mut HashSet::new())
            .await
    }

    #[instrument(skip(self, dir, file_override, claimed))]
    async fn process_into(
        &self,
        id: &str,
        dir: &Path,
        file_override: Option<&Path>,
        claimed: &mut HashSet<PathBuf>,
    ) -> Result<ItemOutcome, ItemError> {
        let info = self.drive.fetch_info(id).await?;
        let stream = locate_stream(&info.text);

        let Some(url) = stream.url.as_deref() else {
            error!(id, "unable to retrieve the video URL");
            return Ok(ItemOutcome::NoStream);
        };

        let path = match file_override {
            Some(path) => path.to_path_buf(),
            None => claim_path(claimed, dir, stream.title.as_deref(), id),
        };
        let outcome = self
            .http
            .download(url, &info.cookies, &path, self.options.chunk_size)
            .await?;
        Ok(ItemOutcome::Downloaded(outcome))
    }
}

/// Picks the output path for `id` inside `dir` and records it as taken.
///
/// A title already used by an earlier id in the same run falls back to the
/// id, then to `<id>-<n>`. Names stay stable between runs so resume still
/// finds its partial file.
fn claim_path(
    claimed: &mut HashSet<PathBuf>,
    dir: &Path,
    title: Option<&str>,
    id: &str,
) -> PathBuf {
    let mut path = dir.join(derive_filename(None, title, id));
    if claimed.contains(&path) {
        let fallback = dir.join(derive_filename(None, None, id));
        warn!(
            id,
            taken = %path.display(),
            path = %fallback.display(),
            "file name already used in this run; saving under the id"
        );
        path = fallback;
    }
    let mut n = 1;
    while claimed.contains(&path) {
        path = dir.join(format!("{id}-{n}"));
        n += 1;
    }
    claimed.insert(path.clone());
    path
}
