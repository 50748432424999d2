//! Logger setup for the veridion binary.
//!
//! Wraps `env_logger` so the binary and its tests initialise logging the same
//! way. Safe to call more than once.

use log::LevelFilter;

/// Initialises `env_logger`, writing to stderr.
///
/// `Some(level)` forces that level for every module; `None` defers to
/// `RUST_LOG` and falls back to `warn`.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::new();
    match level {
        Some(level) => {
            builder.filter_level(level);
        }
        None => {
            builder.filter_level(LevelFilter::Warn);
            if let Ok(filters) = std::env::var("RUST_LOG") {
                builder.parse_filters(&filters);
            }
        }
    }
    builder.format_timestamp(None).target(env_logger::Target::Stderr);
    // Fails only if a logger is already installed.
    let _ = builder.try_init();
}
