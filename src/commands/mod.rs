// Command handlers module
pub mod classify;
pub mod config;
pub mod dashboard;
pub mod fetch;
pub mod version;

// Re-exports for cleaner imports
pub use classify::execute as classify;
pub use fetch::execute as fetch;
pub use version::execute as version;
