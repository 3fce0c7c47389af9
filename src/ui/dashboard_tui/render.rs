use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph, Wrap},
};

use super::app::{DashboardApp, Screen};
use super::widgets::{popup_rect, spinner, status_color, tier_color};
use crate::core::solar::{format_flux, AlertPanel, DashboardView, FlareClass};

/// Main render function
pub fn render_ui(frame: &mut Frame, app: &DashboardApp) {
    let area = frame.area();

    match &app.screen {
        Screen::Loading => render_loading(frame, area, app),
        Screen::Dashboard(view) => render_dashboard(frame, area, app, view),
        Screen::Error { reason, retained } => match retained {
            Some(view) => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(4), Constraint::Min(0)])
                    .split(area);
                render_error_panel(frame, chunks[0], reason);
                render_dashboard(frame, chunks[1], app, view);
            }
            None => render_error_screen(frame, area, app, reason),
        },
    }

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

fn render_loading(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let text = vec![
        Line::from(Span::styled(
            spinner(app.ticks),
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Loading solar data from {}", app.base_url)),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Solar Guardian "));

    frame.render_widget(paragraph, popup_rect(area.width * 3 / 5, 5, area));
}

fn render_error_screen(frame: &mut Frame, area: Rect, app: &DashboardApp, reason: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, chunks[0], app, None);
    render_error_panel(frame, chunks[1], reason);
    render_footer(frame, chunks[3], app);
}

fn render_error_panel(frame: &mut Frame, area: Rect, reason: &str) {
    let text = vec![
        Line::from(Span::styled(
            "⚠ Failed to fetch solar data",
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(reason, Style::default().fg(Color::Red))),
    ];

    let paragraph = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );

    frame.render_widget(paragraph, area);
}

fn render_dashboard(frame: &mut Frame, area: Rect, app: &DashboardApp, view: &DashboardView) {
    // Long alert lists are clipped to a third of the screen
    let alert_rows = u16::try_from(view.alerts.items().len()).unwrap_or(u16::MAX);
    let alert_height = alert_rows
        .saturating_add(2)
        .min((area.height / 3).max(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),               // Header
            Constraint::Length(8),               // Status cards
            Constraint::Min(8),                  // Flux chart
            Constraint::Length(alert_height),    // Alerts
            Constraint::Length(1),               // Footer
        ])
        .split(area);

    render_header(frame, chunks[0], app, Some(view));
    render_cards(frame, chunks[1], view);
    render_flux_chart(frame, chunks[2], view);
    render_alerts(frame, chunks[3], &view.alerts);
    render_footer(frame, chunks[4], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &DashboardApp, view: Option<&DashboardView>) {
    let mut title = String::from(" Solar Guardian │ Real-time Solar Activity Monitor ");

    if let Some(view) = view {
        title.push_str(&format!("│ Last Updated: {} ", view.last_updated_label()));
        if let Some(kp) = view.latest_geomagnetic() {
            title.push_str(&format!("│ Kp: {:.2} ", kp.kp_index));
        }
    }
    if app.refreshing {
        title.push_str(&format!("│ {} refreshing ", spinner(app.ticks)));
    }

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightBlue));

    frame.render_widget(block, area);
}

fn render_cards(frame: &mut Frame, area: Rect, view: &DashboardView) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    // Current activity
    let activity_color = tier_color(view.activity.color());
    let mut activity_lines = vec![
        Line::from(Span::styled(
            view.activity.label(),
            Style::default()
                .fg(activity_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            view.activity.description(),
            Style::default().fg(Color::Gray),
        )),
    ];
    if let Some(flare) = view.snapshot.latest_flare() {
        activity_lines.push(Line::from(""));
        activity_lines.push(Line::from(format!(
            "Latest flux: {} W/m²",
            format_flux(flare.flux)
        )));
    }
    let activity = Paragraph::new(activity_lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Current Activity ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(activity_color)),
        );
    frame.render_widget(activity, cards[0]);

    // Classification guide
    let legend: Vec<Line> = FlareClass::legend_order()
        .map(|class| {
            Line::from(vec![
                Span::styled("● ", Style::default().fg(tier_color(class.color()))),
                Span::raw(class.info().legend),
            ])
        })
        .collect();
    let guide = Paragraph::new(legend).block(
        Block::default()
            .title(" Solar Flare Scale ")
            .borders(Borders::ALL),
    );
    frame.render_widget(guide, cards[1]);

    // System status
    let color = status_color(view.status);
    let status = Paragraph::new(vec![
        Line::from(Span::styled(
            view.status.label(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            view.status.detail(),
            Style::default().fg(Color::Gray),
        )),
    ])
    .block(
        Block::default()
            .title(" System Status ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    frame.render_widget(status, cards[2]);
}

fn render_flux_chart(frame: &mut Frame, area: Rect, view: &DashboardView) {
    let series = &view.chart;
    let block = Block::default()
        .title(" Solar Flux Trends (W/m², log scale) ")
        .borders(Borders::ALL);

    let Some((lower, upper)) = series.log_bounds() else {
        let empty = Paragraph::new("No flare readings")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let data = series.plot_data();
    let x_max = (series.len().saturating_sub(1)).max(1) as f64;

    let (first, last) = (&series.points[0], &series.points[series.len() - 1]);
    let x_labels = vec![first.time_label(), last.time_label()];
    let latest = format!("Solar Flux (latest {})", format_flux(last.flux));

    let dataset = Dataset::default()
        .name(latest)
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::LightBlue))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([lower, upper])
                .labels(series.decade_labels()),
        );

    frame.render_widget(chart, area);
}

fn render_alerts(frame: &mut Frame, area: Rect, panel: &AlertPanel) {
    let (icon, color) = if panel.is_all_clear() {
        ("✔ ", Color::LightGreen)
    } else {
        ("⚠ ", Color::LightYellow)
    };

    let lines: Vec<Line> = panel
        .items()
        .into_iter()
        .map(|item| {
            Line::from(vec![
                Span::styled(icon, Style::default().fg(color)),
                Span::raw(item),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" System Alerts ")
            .borders(Borders::ALL),
    );

    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let footer = Paragraph::new(format!(
        " q quit │ r refresh │ ? help │ Updated every {} seconds ",
        app.refresh_interval_secs
    ))
    .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(footer, area);
}

const KEY_BINDINGS: [(&str, &str); 3] = [
    ("q / Esc", "Quit"),
    ("r / F5", "Refresh now"),
    ("? / h", "Toggle this help"),
];

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let mut lines = vec![Line::from("")];
    lines.extend(KEY_BINDINGS.iter().map(|(keys, action)| {
        Line::from(vec![
            Span::styled(
                format!("  {:<10}", keys),
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(*action),
        ])
    }));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Data refreshes automatically in the background",
        Style::default().fg(Color::Gray),
    )));

    let help = Paragraph::new(lines).block(
        Block::default()
            .title(" Keys ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightYellow)),
    );

    let popup = popup_rect(54, help_height(), area);
    frame.render_widget(Clear, popup);
    frame.render_widget(help, popup);
}

fn help_height() -> u16 {
    // bindings, two spacers, hint line and borders
    KEY_BINDINGS.len() as u16 + 5
}
