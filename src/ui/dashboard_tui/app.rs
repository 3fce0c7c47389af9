use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::core::solar::{DashboardRuntime, DashboardView, HttpSolarClient, ViewState};
use crate::core::Config;

use super::event_handler::DashboardEvent;
use super::render::render_ui;

/// Redraw cadence; drives the spinner and key handling, not fetching
const UI_TICK: Duration = Duration::from_millis(250);

/// What the dashboard currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    /// Nothing has settled yet
    Loading,
    Dashboard(DashboardView),
    Error {
        reason: String,
        /// Last good view, kept only when configured to retain it
        retained: Option<DashboardView>,
    },
}

/// Dashboard application state
pub struct DashboardApp {
    pub screen: Screen,
    /// A refresh is in flight behind an already settled screen
    pub refreshing: bool,
    pub should_quit: bool,
    pub show_help: bool,
    pub refresh_interval_secs: u64,
    pub base_url: String,
    pub ticks: usize,
}

impl DashboardApp {
    pub fn new(config: &Config) -> Self {
        Self {
            screen: Screen::Loading,
            refreshing: false,
            should_quit: false,
            show_help: false,
            refresh_interval_secs: config.refresh_interval().as_secs(),
            base_url: config.base_url.clone(),
            ticks: 0,
        }
    }

    /// Fold a scheduler state into the screen.
    ///
    /// `Loading` after the first settled state keeps the current screen and
    /// only raises the refreshing flag.
    pub fn apply_state(&mut self, state: &ViewState) {
        match state {
            ViewState::Idle => {}
            ViewState::Loading => {
                self.refreshing = !matches!(self.screen, Screen::Loading);
            }
            ViewState::Ready(snapshot) => {
                self.screen = Screen::Dashboard(DashboardView::project(snapshot.clone()));
                self.refreshing = false;
            }
            ViewState::Failed { reason, retained } => {
                self.screen = Screen::Error {
                    reason: reason.clone(),
                    retained: retained.clone().map(DashboardView::project),
                };
                self.refreshing = false;
            }
        }
    }

    /// Handle keyboard events. Returns true when a manual refresh was asked for.
    pub fn handle_event(&mut self, event: DashboardEvent) -> bool {
        match event {
            DashboardEvent::Quit => self.should_quit = true,
            DashboardEvent::ToggleHelp => self.show_help = !self.show_help,
            DashboardEvent::Refresh => return true,
            DashboardEvent::None => {}
        }
        false
    }

    pub fn on_tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
    }
}

/// Run the dashboard TUI application
pub fn run_dashboard_app(config: &Config) -> Result<()> {
    let client = HttpSolarClient::new(&config.base_url, config.request_timeout())
        .context("Failed to create solar data client")?;
    let runtime = DashboardRuntime::start(client, config.scheduler_config())
        .context("Failed to start refresh scheduler")?;

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = DashboardApp::new(config);
    let result = event_loop(&mut terminal, &mut app, &runtime);

    // Restore terminal before reporting any loop error
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    runtime.shutdown();
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut DashboardApp,
    runtime: &DashboardRuntime,
) -> Result<()> {
    let mut state_rx = runtime.state_rx.clone();
    app.apply_state(&state_rx.borrow_and_update());

    loop {
        if state_rx.has_changed().unwrap_or(false) {
            let state = state_rx.borrow_and_update().clone();
            app.apply_state(&state);
        }

        terminal.draw(|frame| render_ui(frame, app))?;

        if event::poll(UI_TICK).context("Event poll failed")? {
            if let Event::Key(key) = event::read().context("Event read failed")? {
                if key.kind == KeyEventKind::Press {
                    let wants_refresh = app.handle_event(DashboardEvent::from_key(key.code));
                    if wants_refresh && !runtime.refresh_now() {
                        log::debug!("Refresh already pending");
                    }
                }
            }
        } else {
            app.on_tick();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
