use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use crate::config::RunConfig;
use crate::export::{build_time_series, write_json, write_time_series, TimeSeriesPoint};
use crate::extract::Extractor;
use crate::fetch::{fetch_first, PageSource};
use crate::stats::Statistics;
use crate::table::RegionTables;
use crate::urls::candidate_urls;

/// What a run produced.
#[derive(Debug)]
pub struct RunReport {
    pub counts: CollectCounts,
    pub tables: RegionTables,
    pub series: Vec<TimeSeriesPoint>,
    pub output: PathBuf,
}

/// Fetch and extract every configured period into fresh tables.
/// Periods without a page are skipped.
pub fn collect<S: PageSource + ?Sized>(
    config: &RunConfig,
    source: &S,
    extractor: &Extractor,
) -> Result<(RegionTables, CollectCounts)> {
    let mut tables = RegionTables::new(config.fiscal_years(), &config.months);
    let mut counts = CollectCounts::default();

    for period in config.periods() {
        counts.periods += 1;
        let candidates = candidate_urls(&config.url_template, &period);
        let Some(html) = fetch_first(source, &candidates, &config.not_found_marker) else {
            info!("No bulletin found for {}", period);
            counts.unavailable += 1;
            continue;
        };
        counts.fetched += 1;

        let extraction = extractor.extract_page(&html);
        counts.missing_regions += extraction.missing().len();
        tables
            .record(&period, &extraction)
            .with_context(|| format!("Failed to record {}", period))?;
    }

    Ok((tables, counts))
}

/// Tallies from [`collect`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollectCounts {
    pub periods: usize,
    pub fetched: usize,
    pub unavailable: usize,
    pub missing_regions: usize,
}

pub fn run<S: PageSource + ?Sized>(config: &RunConfig, source: &S) -> Result<RunReport> {
    run_with_extractor(config, source, &Extractor::default())
}

pub fn run_with_extractor<S: PageSource + ?Sized>(
    config: &RunConfig,
    source: &S,
    extractor: &Extractor,
) -> Result<RunReport> {
    config.validate().context("Invalid run configuration")?;

    let (tables, counts) = collect(config, source, extractor)?;
    let stats = Statistics::aggregate(&tables);
    let series = build_time_series(&stats, &config.months, config.anchor_year()?)?;

    write_time_series(&series, &config.output)?;
    info!("Time series saved to {}", config.output.display());

    if let Some(path) = &config.tables_output {
        write_json(&tables, path)?;
        info!("Region tables saved to {}", path.display());
    }

    Ok(RunReport {
        counts,
        tables,
        series,
        output: config.output.clone(),
    })
}
