use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use crate::core::solar::{classify, format_flux};
use crate::ui::console::tier_colored;

/// Print the tier of a single flux value
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let flux = *matches
        .get_one::<f64>("flux")
        .context("Flux argument is required")?;

    if !flux.is_finite() || flux <= 0.0 {
        bail!("Flux must be a positive number of W/m², got {}", flux);
    }

    let class = classify(flux);
    let info = class.info();

    println!(
        "{} {} W/m²",
        tier_colored(class.label(), class.color()).bold(),
        format_flux(flux)
    );
    println!("  {} {}", "Rank:".dimmed(), class.rank());
    println!("  {} {}", "Range:".dimmed(), info.range);
    println!("  {}", info.description);

    Ok(())
}
