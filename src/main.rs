//! CLI entry point for the Drive video downloader.

use std::process::ExitCode;

use tracing::error;

mod app;
mod cli;

/// Process outcome mapped to the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    /// Everything attempted succeeded (or there was nothing to do).
    Success,
    /// Some files downloaded, some did not.
    Partial,
    /// The run aborted or nothing downloaded.
    Failure,
}

impl From<ProcessExit> for ExitCode {
    fn from(exit: ProcessExit) -> Self {
        match exit {
            ProcessExit::Success => ExitCode::SUCCESS,
            ProcessExit::Partial => ExitCode::from(2),
            ProcessExit::Failure => ExitCode::FAILURE,
        }
    }
}

// One identifier at a time: a current-thread runtime is all the pipeline needs.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match app::runtime::run_videoloader().await {
        Ok(exit) => exit.into(),
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
