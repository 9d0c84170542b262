//! Byte progress bars for stream transfers.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const BAR_TEMPLATE: &str =
    "{msg} {percent:>3}%|{wide_bar}| {bytes}/{total_bytes} [{elapsed_precise}<{eta_precise}, {bytes_per_sec}]";

const SPINNER_TEMPLATE: &str = "{spinner} {msg} {bytes} [{elapsed_precise}, {bytes_per_sec}]";

/// Whether transfers draw a progress bar on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressMode {
    /// Draw a bar (interactive terminals).
    Bar,
    /// Track progress without drawing (quiet mode, pipes, tests).
    #[default]
    Hidden,
}

/// Creates a bar for one transfer, already advanced past the bytes on disk.
///
/// `total` is `None` when the server sent no content length; a byte
/// spinner is used instead of a bar.
#[must_use]
pub(crate) fn transfer_bar(mode: ProgressMode, total: Option<u64>, initial: u64, name: &str) -> ProgressBar {
    let bar = match mode {
        ProgressMode::Hidden => return hidden_bar(total, initial),
        ProgressMode::Bar => match total {
            Some(total) => {
                let bar = ProgressBar::new(total);
                bar.set_style(
                    ProgressStyle::with_template(BAR_TEMPLATE)
                        .unwrap_or_else(|_| ProgressStyle::default_bar()),
                );
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(
                    ProgressStyle::with_template(SPINNER_TEMPLATE)
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                bar
            }
        },
    };
    bar.set_message(name.to_string());
    bar.set_position(initial);
    bar
}

fn hidden_bar(total: Option<u64>, initial: u64) -> ProgressBar {
    let bar = ProgressBar::with_draw_target(total, ProgressDrawTarget::hidden());
    bar.set_position(initial);
    bar
}
