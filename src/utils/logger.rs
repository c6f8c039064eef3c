//! Logging Infrastructure
//!
//! Structured logging setup. Level comes from `RUST_LOG` when set, otherwise
//! the passed default.

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_level("info");
}

/// Initialize the logger with a default level
pub fn init_logger_with_level(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false)
        .try_init();
}
