//! Dashboard command handler.
//!
//! Runs the live solar activity dashboard in the terminal.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::core::config::URL_ENV_VAR;
use crate::core::Config;
use crate::ui::dashboard_tui::run_dashboard_app;

/// Execute the dashboard command
pub fn execute(matches: Option<&ArgMatches>) -> Result<()> {
    let config_path = Config::get_config_path()?;

    // The dashboard owns the terminal, so logs go to a file
    let init_logging = || {
        if let Some(path) = crate::init_file_logging() {
            log::info!("Dashboard logging to {:?}", path);
        }
    };
    let env_url = std::env::var(URL_ENV_VAR).ok();
    let config = load_logged(init_logging, &config_path, env_url, matches)?;

    log::info!(
        "Starting dashboard for {} (every {}s)",
        config.base_url,
        config.refresh_interval_secs
    );

    run_dashboard_app(&config).context("Failed to run solar dashboard")
}

/// Start logging, then load the config so its warnings are recorded.
fn load_logged(
    init_logging: impl FnOnce(),
    config_path: &Path,
    env_url: Option<String>,
    matches: Option<&ArgMatches>,
) -> Result<Config> {
    init_logging();

    let mut config = Config::load_from(config_path).context("Failed to load configuration")?;
    config.apply_env(env_url);

    if let Some(matches) = matches {
        apply_overrides(&mut config, matches);
    }
    Ok(config)
}

/// Apply `--url`, `--interval` and `--retain-on-error`
pub fn apply_overrides(config: &mut Config, matches: &ArgMatches) {
    if let Some(url) = matches.get_one::<String>("url") {
        config.set_base_url(url.clone());
    }
    if let Some(interval) = matches.get_one::<u64>("interval") {
        config.refresh_interval_secs = *interval;
    }
    if matches.get_flag("retain-on-error") {
        config.retain_snapshot_on_error = true;
    }
}
