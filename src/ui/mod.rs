// UI and formatting module

pub mod console;
pub mod dashboard_tui;

// Re-export commonly used items for cleaner imports
pub use console::{dimmed, error, info, success, warn};
