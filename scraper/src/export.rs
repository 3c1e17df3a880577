use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::period::Month;
use crate::region::Region;
use crate::stats::{Statistics, Summary};

/// One month of the exported series.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub summaries: Vec<(Region, Summary)>,
}

/// Fields are written as `date` followed by `avg_`, `u_`, `l_`, `min_` and
/// `max_` for each region in turn.
impl Serialize for TimeSeriesPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + 5 * self.summaries.len()))?;
        map.serialize_entry("date", &self.date.format("%Y-%m-%d").to_string())?;
        for (region, summary) in &self.summaries {
            let key = region.key();
            map.serialize_entry(&format!("avg_{}", key), &summary.mean)?;
            map.serialize_entry(&format!("u_{}", key), &summary.upper())?;
            map.serialize_entry(&format!("l_{}", key), &summary.lower())?;
            map.serialize_entry(&format!("min_{}", key), &summary.min)?;
            map.serialize_entry(&format!("max_{}", key), &summary.max)?;
        }
        map.end()
    }
}

/// Display date for a fiscal month. The year is a convention for plotting:
/// October..December use the anchor, the rest use the year after.
pub fn display_date(month: Month, anchor_year: i32) -> Option<NaiveDate> {
    let year = if month.in_prior_calendar_year() {
        anchor_year
    } else {
        anchor_year.checked_add(1)?
    };
    NaiveDate::from_ymd_opt(year, month.number(), 1)
}

pub fn build_time_series(
    stats: &Statistics,
    months: &[Month],
    anchor_year: i32,
) -> Result<Vec<TimeSeriesPoint>> {
    months
        .iter()
        .map(|&month| {
            let date = display_date(month, anchor_year)
                .with_context(|| format!("no calendar date for {} {}", month, anchor_year))?;
            let summaries = Region::ALL
                .iter()
                .map(|&region| (region, stats.summary(region, month)))
                .collect();
            Ok(TimeSeriesPoint { date, summaries })
        })
        .collect()
}

/// Pretty-print any serializable value to a JSON file.
pub fn write_json<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write JSON file: {}", path.display()))
}

pub fn write_time_series<P: AsRef<Path>>(points: &[TimeSeriesPoint], path: P) -> Result<()> {
    write_json(points, path)
}
