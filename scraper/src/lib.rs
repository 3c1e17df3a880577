pub mod config;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod period;
pub mod pipeline;
pub mod region;
pub mod stats;
pub mod table;
pub mod urls;

// Integration-style tests over HTML fixtures
#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::config::{ConfigError, RunConfig};
pub use crate::export::{build_time_series, write_time_series, TimeSeriesPoint};
pub use crate::extract::{normalize, Cutoff, Extraction, Extractor, RegionMatcher};
pub use crate::fetch::{fetch_first, FetchError, HttpSource, PageSource};
pub use crate::period::{FiscalPeriod, Month};
pub use crate::pipeline::{run, run_with_extractor, CollectCounts, RunReport};
pub use crate::region::Region;
pub use crate::stats::{Statistics, Summary};
pub use crate::table::{RegionTable, RegionTables, TableError};
pub use crate::urls::candidate_urls;
