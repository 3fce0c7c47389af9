use ratatui::layout::Flex;
use ratatui::prelude::*;

use crate::core::solar::{SystemStatus, TierColor};

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Terminal color for a tier or the neutral unknown state
pub fn tier_color(color: TierColor) -> Color {
    match color {
        TierColor::Blue => Color::LightBlue,
        TierColor::Green => Color::LightGreen,
        TierColor::Yellow => Color::LightYellow,
        TierColor::Orange => Color::Rgb(251, 146, 60),
        TierColor::Red => Color::LightRed,
        TierColor::Gray => Color::Gray,
    }
}

pub fn status_color(status: SystemStatus) -> Color {
    match status {
        SystemStatus::Normal => Color::LightGreen,
        SystemStatus::Alert { .. } => Color::LightRed,
    }
}

pub fn spinner(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}

/// Fixed-size popup area centered in `area`, clamped to fit.
///
/// Hosts the loading box and the help overlay, which are sized in rows of
/// text rather than in percentages.
pub fn popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    popup
}
