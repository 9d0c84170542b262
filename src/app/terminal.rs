//! Terminal capability checks and tracing subscriber setup.

use std::io::IsTerminal;

use videoloader_core::ProgressMode;

pub(crate) fn no_color_env_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty())
}

pub(crate) fn is_dumb_terminal() -> bool {
    std::env::var("TERM")
        .map(|value| value.eq_ignore_ascii_case("dumb"))
        .unwrap_or(false)
}

pub(crate) fn should_disable_color(no_color_env: bool, dumb_terminal: bool) -> bool {
    no_color_env || dumb_terminal
}

pub(crate) fn should_draw_progress(
    stderr_is_terminal: bool,
    quiet: bool,
    dumb_terminal: bool,
) -> bool {
    stderr_is_terminal && !quiet && !dumb_terminal
}

/// Picks the progress mode for this process from stderr and the quiet flag.
pub(crate) fn progress_mode(quiet: bool) -> ProgressMode {
    if should_draw_progress(std::io::stderr().is_terminal(), quiet, is_dumb_terminal()) {
        ProgressMode::Bar
    } else {
        ProgressMode::Hidden
    }
}

pub(crate) fn init_tracing(default_level: &str, force_cli_level: bool) {
    let no_color = should_disable_color(no_color_env_requested(), is_dumb_terminal());
    let filter = if force_cli_level {
        tracing_subscriber::EnvFilter::new(default_level)
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level))
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .with_env_filter(filter)
        .try_init();
}
