// Core business logic module

pub mod config;
pub mod solar;

// Re-export commonly used items
pub use config::Config;
pub use solar::{DashboardView, FlareClass, SolarSnapshot, ViewState};
