use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dv_bulletin::{run, HttpSource, Region, RunConfig};

/// Scrape visa bulletins and summarize DV lottery cutoffs per region
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file with run settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// First fiscal year to scrape
    #[arg(long)]
    from_year: Option<i32>,

    /// Fiscal year to stop before
    #[arg(long)]
    to_year: Option<i32>,

    /// Where to write the monthly time series
    #[arg(long)]
    output: Option<PathBuf>,

    /// Also write the raw per-region tables here
    #[arg(long)]
    tables_output: Option<PathBuf>,

    /// Calendar year used for the October-December display dates
    #[arg(long)]
    anchor_year: Option<i32>,

    /// Bulletin address template with {fiscal_year}, {suffix}, {month} and {year}
    #[arg(long)]
    url_template: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)?,
            None => RunConfig::default(),
        };
        if let Some(year) = self.from_year {
            config.first_fiscal_year = year;
        }
        if let Some(year) = self.to_year {
            config.end_fiscal_year = year;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if self.tables_output.is_some() {
            config.tables_output = self.tables_output;
        }
        if self.anchor_year.is_some() {
            config.anchor_year = self.anchor_year;
        }
        if let Some(template) = self.url_template {
            config.url_template = template;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Cli::parse().into_config()?;
    config.validate().context("Invalid run configuration")?;
    println!(
        "Scraping fiscal years {} up to {} (exclusive)",
        config.first_fiscal_year, config.end_fiscal_year
    );

    let report = run(&config, &HttpSource::new()).context("Scrape failed")?;

    println!(
        "\nFetched {} of {} bulletins ({} unavailable, {} missing region values)",
        report.counts.fetched,
        report.counts.periods,
        report.counts.unavailable,
        report.counts.missing_regions
    );
    for region in Region::ALL {
        let observed: usize = config
            .months
            .iter()
            .map(|&month| report.tables.table(region).row_values(month).len())
            .sum();
        println!("  {}: {} cutoff numbers", region, observed);
    }
    println!("\nTime series saved to {}", report.output.display());

    Ok(())
}
