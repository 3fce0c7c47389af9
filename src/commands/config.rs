use anyhow::{Context, Result};
use colored::Colorize;

use crate::core::solar::client::endpoint_url;
use crate::core::config::URL_ENV_VAR;
use crate::core::Config;
use crate::ui;

pub fn handle_config(matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("show", _)) => show(),
        Some(("path", _)) => path(),
        Some(("set-url", sub_matches)) => set_url(sub_matches),
        Some(("reset", _)) => reset(),
        _ => {
            println!("Use 'solar-guardian config --help' for more information.");
            Ok(())
        }
    }
}

fn show() -> Result<()> {
    let config = Config::load()?;
    let config_path = Config::get_config_path()?;

    ui::info("Solar Guardian configuration");
    println!("  {} {}", "File:".dimmed(), config_path.display());
    println!("  {} {}", "Provider URL:".dimmed(), config.base_url.white());
    println!(
        "  {} {}s",
        "Refresh interval:".dimmed(),
        config.refresh_interval().as_secs()
    );
    println!(
        "  {} {}s",
        "Request timeout:".dimmed(),
        config.request_timeout().as_secs()
    );
    println!(
        "  {} {}",
        "Keep last snapshot on error:".dimmed(),
        config.retain_snapshot_on_error
    );

    if let Ok(url) = std::env::var(URL_ENV_VAR) {
        ui::dimmed(&format!("Provider URL overridden by {}={}", URL_ENV_VAR, url));
    }

    Ok(())
}

fn path() -> Result<()> {
    println!("{}", Config::get_config_path()?.display());
    Ok(())
}

fn set_url(matches: &clap::ArgMatches) -> Result<()> {
    let url = matches
        .get_one::<String>("url")
        .context("URL argument is required")?;

    // Reject anything the client could not fetch from
    let endpoint = endpoint_url(url)?;

    // Load without the environment so the override is not persisted
    let config_path = Config::get_config_path()?;
    let mut config = Config::load_from(&config_path)?;
    config.set_base_url(url.trim().trim_end_matches('/').to_string());
    config.save_to(&config_path)?;

    ui::success("✓ Provider URL saved");
    println!("  {} {}", "Endpoint:".dimmed(), endpoint.as_str().white());

    if std::env::var(URL_ENV_VAR).is_ok_and(|v| !v.trim().is_empty()) {
        ui::warn(&format!("{} is set and takes precedence over the saved URL", URL_ENV_VAR));
    }

    Ok(())
}

fn reset() -> Result<()> {
    Config::default().save()?;
    ui::success("✓ Configuration reset to defaults");
    Ok(())
}
