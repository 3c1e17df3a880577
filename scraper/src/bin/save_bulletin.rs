use anyhow::{Context, Result};
use clap::Parser;
use dv_bulletin::{
    candidate_urls, fetch_first, Extractor, FiscalPeriod, HttpSource, Month, Region, RunConfig,
};
use std::fs;
use std::path::Path;

/// Fetch one bulletin, save it as a regression fixture and show what extraction finds
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Fiscal year of the bulletin
    fiscal_year: i32,

    /// Month name, e.g. october
    month: Month,

    /// Name of the saved fixture
    test_name: String,

    /// Bulletin address template
    #[arg(long)]
    url_template: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = RunConfig {
        first_fiscal_year: cli.fiscal_year,
        end_fiscal_year: cli
            .fiscal_year
            .checked_add(1)
            .with_context(|| format!("Fiscal year {} is out of range", cli.fiscal_year))?,
        months: vec![cli.month],
        ..RunConfig::default()
    };
    if let Some(template) = cli.url_template {
        config.url_template = template;
    }
    config.validate().context("Invalid bulletin period")?;

    let period = FiscalPeriod::new(cli.fiscal_year, cli.month);
    println!("Fetching bulletin for {}...", period);

    let candidates = candidate_urls(&config.url_template, &period);
    let html = fetch_first(&HttpSource::new(), &candidates, &config.not_found_marker)
        .with_context(|| format!("No bulletin found for {}", period))?;

    // Create failures directory if it doesn't exist
    let failures_dir = Path::new("src/tests/fixtures/failures");
    fs::create_dir_all(failures_dir).context("Failed to create failures directory")?;

    let file_path = failures_dir.join(format!("{}.html", cli.test_name));
    fs::write(&file_path, &html).context("Failed to write HTML file")?;

    println!(
        "Saved HTML to {} for regression testing",
        file_path.display()
    );

    println!("\nExtraction results:");
    let extraction = Extractor::default().extract_page(&html);
    for region in Region::ALL {
        match extraction.cutoff(region) {
            Some(cutoff) => println!("  - {}: {:?}", region, cutoff),
            None => println!("  - {}: missing", region),
        }
    }

    if extraction.missing().is_empty() {
        println!("\nAll regions extracted. This page may not be a failure case.");
    } else {
        println!("\nThis page will be included in regression tests.");
    }

    Ok(())
}
