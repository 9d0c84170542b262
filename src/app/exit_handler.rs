//! Maps a finished run to the process exit outcome.

use videoloader_core::RunSummary;

use crate::ProcessExit;

/// Exit outcome for a completed run.
///
/// A run where no id failed (including an empty folder) succeeds. A folder
/// where only some ids produced a file is partial.
pub(crate) fn exit_outcome(summary: &RunSummary) -> ProcessExit {
    outcome_for_counts(summary.completed(), summary.unsuccessful())
}

fn outcome_for_counts(downloaded: usize, unsuccessful: usize) -> ProcessExit {
    match (downloaded, unsuccessful) {
        (_, 0) => ProcessExit::Success,
        (0, _) => ProcessExit::Failure,
        _ => ProcessExit::Partial,
    }
}
