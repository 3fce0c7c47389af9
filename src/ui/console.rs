// Console output helpers for the non-TUI commands

use colored::{ColoredString, Colorize};

use crate::core::solar::{SystemStatus, TierColor};

/// Display a warning message
pub fn warn(message: &str) {
    println!("{}", format!("⚠️  Warning: {}", message).yellow().bold());
}

/// Display an info message
pub fn info(message: &str) {
    println!("{}", message.cyan());
}

/// Display a success message
pub fn success(message: &str) {
    println!("{}", message.green().bold());
}

/// Display an error message on stderr
pub fn error(message: &str) {
    eprintln!("{}", message.red().bold());
}

/// Display a dimmed/secondary message
pub fn dimmed(message: &str) {
    println!("{}", message.dimmed());
}

/// Color a tier label the way the dashboard does
pub fn tier_colored(text: &str, color: TierColor) -> ColoredString {
    match color {
        TierColor::Blue => text.bright_blue(),
        TierColor::Green => text.bright_green(),
        TierColor::Yellow => text.bright_yellow(),
        TierColor::Orange => text.truecolor(251, 146, 60),
        TierColor::Red => text.bright_red(),
        TierColor::Gray => text.dimmed(),
    }
}

pub fn status_colored(status: SystemStatus) -> ColoredString {
    match status {
        SystemStatus::Normal => status.label().bright_green().bold(),
        SystemStatus::Alert { .. } => status.label().bright_red().bold(),
    }
}
