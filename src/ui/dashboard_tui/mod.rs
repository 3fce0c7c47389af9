//! Terminal User Interface for the solar activity dashboard.
//!
//! Provides a live-updating dashboard using ratatui.

mod app;
mod event_handler;
mod render;
mod widgets;

pub use app::{run_dashboard_app, DashboardApp, Screen};
pub use event_handler::DashboardEvent;
pub use render::render_ui;
