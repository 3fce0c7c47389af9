use crossterm::event::KeyCode;

/// Events that can occur in the dashboard TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardEvent {
    /// Quit the application
    Quit,
    /// Toggle help overlay
    ToggleHelp,
    /// Fetch now instead of waiting for the next tick
    Refresh,
    /// No action
    None,
}

impl DashboardEvent {
    pub fn from_key(code: KeyCode) -> Self {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => DashboardEvent::Quit,
            KeyCode::Char('?') | KeyCode::Char('h') => DashboardEvent::ToggleHelp,
            KeyCode::Char('r') | KeyCode::F(5) => DashboardEvent::Refresh,
            _ => DashboardEvent::None,
        }
    }
}
