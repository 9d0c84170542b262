//! Binary-side run wiring: terminal setup, client construction, exit codes.

pub(crate) mod exit_handler;
pub(crate) mod runtime;
pub(crate) mod terminal;
