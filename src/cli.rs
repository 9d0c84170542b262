//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use videoloader_core::DEFAULT_CHUNK_SIZE;

/// Download videos from Google Drive.
///
/// Accepts a file id, a share link, or a folder link. Partially downloaded
/// files are resumed from where they stopped.
#[derive(Parser, Debug)]
#[command(name = "drive-videoloader")]
#[command(author, version, about)]
pub struct Args {
    /// The video ID from Google Drive or a full Google Drive URL
    /// (e.g. 'abc-Qt12kjmS21kjDm2kjd' or 'https://drive.google.com/file/d/ID/view').
    /// Folder URLs download every video in the folder.
    #[arg(required_unless_present = "extract_ids")]
    pub video_id: Option<String>,

    /// Output file name (default: video name in Drive). For folder URLs, the output directory.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Chunk size in bytes for writing the video
    #[arg(short = 'c', long = "chunk_size", value_name = "BYTES", default_value_t = DEFAULT_CHUNK_SIZE, value_parser = parse_chunk_size)]
    pub chunk_size: usize,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output and the progress bar
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print all data-id values found at a URL (e.g. a Drive folder) and exit
    #[arg(long, value_name = "URL")]
    pub extract_ids: Option<String>,
}

impl Args {
    /// Default log filter for the verbosity flags.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }

    /// Whether a verbosity flag was given, which overrides `RUST_LOG`.
    #[must_use]
    pub fn forces_log_level(&self) -> bool {
        self.quiet || self.verbose > 0
    }
}

fn parse_chunk_size(value: &str) -> Result<usize, String> {
    let size: usize = value
        .parse()
        .map_err(|_| format!("'{value}' is not a valid byte count"))?;
    if size == 0 {
        return Err("chunk size must be at least 1 byte".to_string());
    }
    Ok(size)
}
