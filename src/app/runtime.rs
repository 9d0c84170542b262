use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{debug, info, warn};
use videoloader_core::{DriveClient, HttpClient, Orchestrator, RunOptions};

use crate::ProcessExit;
use crate::app::{exit_handler, terminal};
use crate::cli::Args;

pub(crate) async fn run_videoloader() -> Result<ProcessExit> {
    let args = Args::parse();

    terminal::init_tracing(args.default_log_level(), args.forces_log_level());
    debug!(?args, "CLI arguments parsed");

    let drive = DriveClient::new().context("failed to initialize Drive client")?;
    let http = HttpClient::new()
        .context("failed to initialize download client")?
        .with_progress(terminal::progress_mode(args.quiet));
    let options = RunOptions {
        output: args.output.clone(),
        chunk_size: args.chunk_size,
        ..RunOptions::default()
    };
    let orchestrator = Orchestrator::new(drive, http, options);

    if let Some(url) = args.extract_ids.as_deref() {
        if args.video_id.is_some() {
            debug!("--extract-ids given; ignoring positional video id");
        }
        let ids = orchestrator
            .list_ids(url)
            .await
            .with_context(|| format!("error fetching URL {url}"))?;
        if ids.is_empty() {
            warn!("no data-ids found");
        }
        for id in &ids {
            println!("{id}");
        }
        return Ok(ProcessExit::Success);
    }

    let Some(input) = args.video_id.as_deref() else {
        bail!("a video id or URL is required");
    };
    let summary = orchestrator.run(input).await?;

    if summary.total() > 1 {
        info!(
            completed = summary.completed(),
            unsuccessful = summary.unsuccessful(),
            total = summary.total(),
            "run complete"
        );
    }

    Ok(exit_handler::exit_outcome(&summary))
}
