use anyhow::Result;
use clap::{Arg, ArgAction, Command};

use solar_guardian::commands;
use solar_guardian::ui;

fn build_cli() -> Command {
    let url_arg = Arg::new("url")
        .short('u')
        .long("url")
        .value_name("URL")
        .help("Provider base URL (overrides config and SOLAR_GUARDIAN_URL)");

    Command::new("solar-guardian")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Live space-weather dashboard for solar flares and geomagnetic activity")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Open the live dashboard (default)")
                .arg(url_arg.clone())
                .arg(
                    Arg::new("interval")
                        .short('i')
                        .long("interval")
                        .value_name("SECS")
                        .help("Seconds between automatic refreshes")
                        .value_parser(clap::value_parser!(u64).range(1..)),
                )
                .arg(
                    Arg::new("retain-on-error")
                        .long("retain-on-error")
                        .help("Keep showing the last good snapshot when a refresh fails")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("fetch")
                .about("Fetch one snapshot and print a summary")
                .arg(url_arg)
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the snapshot as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("classify")
                .about("Classify an X-ray flux value (W/m²)")
                .arg(
                    Arg::new("flux")
                        .help("Flux in W/m², e.g. 2.3e-5")
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(f64))
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Manage configuration (use 'solar-guardian config --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("show").about("Show the effective configuration"))
                .subcommand(Command::new("path").about("Print the config file location"))
                .subcommand(
                    Command::new("set-url")
                        .about("Save the provider base URL")
                        .arg(
                            Arg::new("url")
                                .help("Base URL, e.g. http://localhost:8000")
                                .required(true)
                                .index(1),
                        ),
                )
                .subcommand(Command::new("reset").about("Restore the default configuration")),
        )
        .subcommand(Command::new("version").about("Shows version information"))
}

fn main() {
    if let Err(e) = run() {
        ui::error(&format!("Error: {:#}", e));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let matches = build_cli().get_matches();

    if matches.get_flag("version") {
        return commands::version();
    }

    match matches.subcommand() {
        Some(("dashboard", sub_matches)) => commands::dashboard::execute(Some(sub_matches)),
        Some(("fetch", sub_matches)) => {
            solar_guardian::init_logging();
            commands::fetch(sub_matches)
        }
        Some(("classify", sub_matches)) => commands::classify(sub_matches),
        Some(("config", sub_matches)) => {
            solar_guardian::init_logging();
            commands::config::handle_config(sub_matches)
        }
        Some(("version", _)) => commands::version(),
        _ => commands::dashboard::execute(None),
    }
}
