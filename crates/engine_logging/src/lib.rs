#![deny(missing_docs)]
//! Shared logging utilities for the statusbot workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. While a poll cycle is
//! running, every line is tagged with its cycle number.

use std::cell::Cell;

thread_local! {
    /// Thread-local storage for the number of the poll cycle in progress.
    ///
    /// The tag is only accurate on a current-thread runtime, where the whole
    /// cycle runs on the thread that set it.
    static POLL_CYCLE: Cell<u64> = const { Cell::new(0) };
}

/// Sets the poll cycle number for the current thread.
/// The poll engine calls this once at the start of every cycle.
pub fn set_poll_cycle(cycle: u64) {
    POLL_CYCLE.with(|v| v.set(cycle));
}

/// Retrieves the poll cycle number for the current thread.
/// Returns 0 before the first cycle has started.
pub fn poll_cycle() -> u64 {
    POLL_CYCLE.with(|v| v.get())
}

/// Prefix for log lines: `[cycle N] `, or nothing outside the poll loop.
#[doc(hidden)]
pub fn cycle_tag() -> String {
    match poll_cycle() {
        0 => String::new(),
        cycle => format!("[cycle {cycle}] "),
    }
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!("{}{}", $crate::cycle_tag(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!("{}{}", $crate::cycle_tag(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!("{}{}", $crate::cycle_tag(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!("{}{}", $crate::cycle_tag(), format_args!($($arg)*));
    }};
}

/// Logs a message that precedes a process halt.
///
/// `log` has no level above error, so these go out at error level with a
/// `CRITICAL` marker that is easy to grep for in `main.log`.
#[macro_export]
macro_rules! engine_critical {
    ($($arg:tt)*) => {{
        log::error!("CRITICAL {}", format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        log::LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
