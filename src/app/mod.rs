//! Binary-side orchestration: run flow, terminal setup, progress display and
//! exit-code mapping.

pub(crate) mod exit_handler;
pub(crate) mod progress_manager;
pub(crate) mod runtime;
pub(crate) mod terminal;
