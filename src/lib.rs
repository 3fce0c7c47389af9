// Solar Guardian Library - Public API

// Re-export error types
pub mod error;
pub use error::{Result, SolarError};

// Module declarations
pub mod commands;
pub mod core;
pub mod ui;

// Re-export commonly used types
pub use core::config::Config;

use std::fs::OpenOptions;
use std::path::PathBuf;

// Initialize logging to stderr
pub fn init_logging() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Initialize logging to a file while the dashboard owns the terminal.
///
/// Leaves logging disabled when no log file can be opened.
pub fn init_file_logging() -> Option<PathBuf> {
    let log_path = dirs::cache_dir().map(|dir| dir.join("solar-guardian").join("solar-guardian.log"));
    let file = log_path.as_ref().and_then(|path| {
        std::fs::create_dir_all(path.parent()?).ok()?;
        OpenOptions::new().create(true).append(true).open(path).ok()
    });

    let file = file?;
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    log_path
}
