// End-to-end: payload text -> snapshot -> projected view -> rendered frame

use std::sync::Arc;

use ratatui::{backend::TestBackend, Terminal};
use solar_guardian::core::solar::{
    AlertPanel, CurrentActivity, DashboardView, FlareClass, SolarSnapshot, SystemStatus, ViewState,
    ALL_CLEAR_MESSAGE,
};
use solar_guardian::core::Config;
use solar_guardian::ui::dashboard_tui::{render_ui, DashboardApp, Screen};

const QUIET_DAY: &str = r#"{
    "flares": [
        {"time_tag": "2023-08-25T09:55:00Z", "flux": 8.0e-7, "energy": "0.1-0.8nm"},
        {"time_tag": "2023-08-25T10:00:00Z", "flux": 2.3e-5, "energy": "0.1-0.8nm", "classification": "M"}
    ],
    "geomagnetic": [],
    "last_updated": "2023-08-25T10:00:30Z",
    "alerts": []
}"#;

const STORMY_DAY: &str = r#"{
    "flares": [],
    "geomagnetic": [{"time_tag": "2023-08-25T09:00:00Z", "kp_index": 7.0, "storm_level": "G3"}],
    "last_updated": "2023-08-25T10:00:30Z",
    "alerts": ["Geomagnetic storm in progress", "Radio blackout possible"]
}"#;

fn view(body: &str) -> DashboardView {
    DashboardView::project(Arc::new(SolarSnapshot::from_json(body).unwrap()))
}

fn render(app: &DashboardApp) -> String {
    let mut terminal = Terminal::new(TestBackend::new(140, 45)).unwrap();
    terminal.draw(|frame| render_ui(frame, app)).unwrap();
    let buffer = terminal.backend().buffer().clone();

    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn test_quiet_day_projection() {
    let view = view(QUIET_DAY);

    assert_eq!(view.activity, CurrentActivity::Classified(FlareClass::M));
    assert_eq!(view.status, SystemStatus::Normal);
    assert_eq!(view.status.detail(), "0 active alerts");
    assert_eq!(view.alerts, AlertPanel::AllClear);
    assert_eq!(view.alerts.items(), vec![ALL_CLEAR_MESSAGE]);
    assert_eq!(view.chart.len(), 2);
    assert_eq!(view.chart.points[0].flux, 8.0e-7);
}

#[test]
fn test_stormy_day_projection() {
    let view = view(STORMY_DAY);

    assert_eq!(view.activity, CurrentActivity::Unknown);
    assert_eq!(view.activity.label(), "Unknown");
    assert_eq!(view.status, SystemStatus::Alert { count: 2 });
    assert_eq!(
        view.alerts.items(),
        vec!["Geomagnetic storm in progress", "Radio blackout possible"]
    );
    assert!(view.chart.is_empty());
    assert_eq!(view.latest_geomagnetic().unwrap().kp_index, 7.0);
}

#[test]
fn test_rendered_dashboard_follows_state_changes() {
    let mut app = DashboardApp::new(&Config::default());
    app.apply_state(&ViewState::Loading);
    assert_eq!(app.screen, Screen::Loading);

    let snapshot = Arc::new(SolarSnapshot::from_json(STORMY_DAY).unwrap());
    app.apply_state(&ViewState::Ready(snapshot));
    let frame = render(&app);
    assert!(frame.contains("Geomagnetic storm in progress"));
    assert!(frame.contains("Radio blackout possible"));
    assert!(frame.contains("Unknown"));
    assert!(!frame.contains(ALL_CLEAR_MESSAGE));

    app.apply_state(&ViewState::Failed {
        reason: "Network error: connection failed".to_string(),
        retained: None,
    });
    let frame = render(&app);
    assert!(frame.contains("Network error: connection failed"));
    assert!(!frame.contains("Geomagnetic storm in progress"));
}
