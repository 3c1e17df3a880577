use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::period::{FiscalPeriod, Month};

pub const DEFAULT_URL_TEMPLATE: &str = "http://travel.state.gov/content/visas/english/law-and-policy/bulletin/{fiscal_year}/visa-bulletin{suffix}-{month}-{year}.html";
pub const DEFAULT_NOT_FOUND_MARKER: &str = "404 - Page Not Found";
pub const DEFAULT_OUTPUT: &str = "dv_lottery.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("fiscal year range {start}..{end} is empty")]
    EmptyYearRange { start: i32, end: i32 },
    #[error("no months configured")]
    NoMonths,
    #[error("month {0} is configured more than once")]
    DuplicateMonth(Month),
    #[error("year {0} has no representable neighbouring calendar year")]
    YearOutOfRange(i32),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Everything a run needs to know. Passed explicitly through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// First fiscal year, inclusive.
    pub first_fiscal_year: i32,
    /// Last fiscal year, exclusive.
    pub end_fiscal_year: i32,
    pub months: Vec<Month>,
    pub url_template: String,
    pub not_found_marker: String,
    pub output: PathBuf,
    pub tables_output: Option<PathBuf>,
    /// Calendar year used for the October..December display dates.
    pub anchor_year: Option<i32>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            first_fiscal_year: 2003,
            end_fiscal_year: 2016,
            months: Month::ALL.to_vec(),
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            not_found_marker: DEFAULT_NOT_FOUND_MARKER.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            tables_output: None,
            anchor_year: None,
        }
    }
}

impl RunConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.first_fiscal_year >= self.end_fiscal_year {
            return Err(ConfigError::EmptyYearRange {
                start: self.first_fiscal_year,
                end: self.end_fiscal_year,
            });
        }
        if self.first_fiscal_year.checked_sub(1).is_none() {
            return Err(ConfigError::YearOutOfRange(self.first_fiscal_year));
        }
        if self.months.is_empty() {
            return Err(ConfigError::NoMonths);
        }
        for (i, month) in self.months.iter().enumerate() {
            if self.months[..i].contains(month) {
                return Err(ConfigError::DuplicateMonth(*month));
            }
        }
        let anchor = self.anchor_year()?;
        if anchor.checked_add(1).is_none() {
            return Err(ConfigError::YearOutOfRange(anchor));
        }
        Ok(())
    }

    pub fn fiscal_years(&self) -> Range<i32> {
        self.first_fiscal_year..self.end_fiscal_year
    }

    /// Every period of the run, years outer and months inner.
    pub fn periods(&self) -> Vec<FiscalPeriod> {
        self.fiscal_years()
            .flat_map(|year| {
                self.months
                    .iter()
                    .map(move |&month| FiscalPeriod::new(year, month))
            })
            .collect()
    }

    /// Anchor for display dates. Defaults to the calendar year in which the
    /// last configured fiscal year began.
    pub fn anchor_year(&self) -> Result<i32, ConfigError> {
        match self.anchor_year {
            Some(year) => Ok(year),
            None => self
                .end_fiscal_year
                .checked_sub(2)
                .ok_or(ConfigError::YearOutOfRange(self.end_fiscal_year)),
        }
    }
}
