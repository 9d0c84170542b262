//! Resumable stream download to disk.
//!
//! This module streams a direct media URL into a local file, appending to
//! whatever partial content is already there.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for large files)
//! - Byte-range resume from the current file size
//! - Chunked writes of a configurable size
//! - Progress bar on interactive terminals
//! - Structured error types with full context
//!
//! # Example
//!
//! ```no_run
//! use std::collections::BTreeMap;
//! use std::path::Path;
//! use videoloader_core::download::{HttpClient, ProgressMode};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new()?.with_progress(ProgressMode::Bar);
//! let outcome = client
//!     .download("https://host/videoplayback?id=1", &BTreeMap::new(), Path::new("clip.mp4"), 1024)
//!     .await?;
//! println!("Downloaded: {}", outcome.path.display());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod filename;
mod progress;

pub use client::{DEFAULT_CHUNK_SIZE, DownloadOutcome, HttpClient};
pub use error::DownloadError;
pub use filename::{derive_filename, sanitize_filename};
pub use progress::ProgressMode;

// Note: we do NOT define module-local Result aliases.
// Use `Result<T, DownloadError>` explicitly in function signatures.
