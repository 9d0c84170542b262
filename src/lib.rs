//! Drive Videoloader Core Library
//!
//! This library resolves Google Drive share links, folder links, or raw file
//! ids to direct stream URLs and saves the streams locally with resumable,
//! progress-reported transfer.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`parser`] - File id extraction, folder `data-id` scanning, info response parsing
//! - [`drive`] - Folder page and `get_video_info` requests
//! - [`download`] - Resumable streaming download engine
//! - [`orchestrator`] - Single-link and folder run policy

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod drive;
pub(crate) mod http_client;
pub mod orchestrator;
pub mod parser;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use download::{
    DEFAULT_CHUNK_SIZE, DownloadError, DownloadOutcome, HttpClient, ProgressMode,
    derive_filename, sanitize_filename,
};
pub use drive::{DriveClient, DriveError, InfoResponse};
pub use orchestrator::{ItemError, ItemOutcome, Orchestrator, RunError, RunOptions, RunSummary};
pub use parser::{StreamDescriptor, extract_data_ids, extract_identifier, is_folder_url, locate_stream};
