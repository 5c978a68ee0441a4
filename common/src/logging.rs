//! helper functions for the logging backend
use flexi_logger::{self, Logger};
use log::Level::Warn;

/// Creates a logging backend.
/// By default all logs with Info or higher are written to stderr.
/// The level can be overridden via `RUST_LOG`, e.g. `RUST_LOG=segment_tree=debug`
/// shows every growth of a segment tree.
///
/// logs can be written via log::{error!, warn!, info!, debug!, trace!}
/// ```
/// common::logging::init_logging();
/// log::info!("Logging is set up");
/// ```
pub fn init_logging() {
    Logger::with_env_or_str("info")
        .format(flexi_logger::colored_opt_format)
        .start()
        .unwrap_or_else(|error| panic!("Logging initialization failed: {}", error));
    log_panics::init();
}

/// Creates a logging backend for use in testing
/// By default all logs with Warn or higher are printed.
/// Calling this more than once is fine.
pub fn init_test_logging() {
    if !log::log_enabled!(Warn) {
        // a concurrently running test may have started the logger in between
        let _ = Logger::with_env_or_str("warn")
            .format(flexi_logger::colored_opt_format)
            .start();
    }
}
