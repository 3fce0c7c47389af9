//! One-shot fetch command.
//!
//! Fetches a single snapshot and prints either a summary or the raw JSON,
//! for scripting.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use crate::core::solar::{
    format_flux, AlertPanel, DashboardView, HttpSolarClient, SolarDataSource, SolarSnapshot,
};
use crate::core::Config;
use crate::ui::console::{status_colored, tier_colored};

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(url) = matches.get_one::<String>("url") {
        config.set_base_url(url.clone());
    }

    let client = HttpSolarClient::new(&config.base_url, config.request_timeout())?;
    log::info!("Fetching {}", client.endpoint());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create async runtime")?;

    let snapshot = runtime
        .block_on(client.fetch())
        .with_context(|| format!("Failed to fetch solar data from {}", client.endpoint()))?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        for line in summary_lines(Arc::new(snapshot)) {
            println!("{}", line);
        }
    }

    Ok(())
}

/// Human-readable summary of one snapshot
pub fn summary_lines(snapshot: Arc<SolarSnapshot>) -> Vec<String> {
    let view = DashboardView::project(snapshot);
    let mut lines = Vec::new();

    lines.push(format!(
        "{} {}",
        "Last updated:".dimmed(),
        view.last_updated_label()
    ));

    let activity = tier_colored(view.activity.label(), view.activity.color()).bold();
    match view.snapshot.latest_flare() {
        Some(flare) => lines.push(format!(
            "{} {} ({} W/m²)",
            "Current activity:".dimmed(),
            activity,
            format_flux(flare.flux)
        )),
        None => lines.push(format!("{} {}", "Current activity:".dimmed(), activity)),
    }
    lines.push(format!("  {}", view.activity.description()));

    lines.push(format!(
        "{} {} ({})",
        "System status:".dimmed(),
        status_colored(view.status),
        view.status.detail()
    ));

    lines.push(format!(
        "{} {} flare readings, {} geomagnetic readings",
        "Series:".dimmed(),
        view.chart.len(),
        view.snapshot.geomagnetic.len()
    ));
    if let Some(kp) = view.latest_geomagnetic() {
        lines.push(format!("{} {:.2}", "Latest Kp:".dimmed(), kp.kp_index));
    }

    match &view.alerts {
        AlertPanel::AllClear => lines.push(format!("{}", view.alerts.items()[0].green())),
        AlertPanel::Alerts(_) => {
            for alert in view.alerts.items() {
                lines.push(format!("{} {}", "⚠".yellow(), alert));
            }
        }
    }

    lines
}
