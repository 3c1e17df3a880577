use std::collections::BTreeMap;

use crate::period::Month;
use crate::region::Region;
use crate::table::RegionTables;

/// Statistics of one month row. Every field is `None` when the row has no
/// observations; `std_dev` also needs at least two.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Summary {
    pub fn from_values(values: &[f64]) -> Summary {
        if values.is_empty() {
            return Summary::default();
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std_dev = if values.len() > 1 {
            let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            Some((sum_sq / (n - 1.0)).sqrt())
        } else {
            None
        };
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Summary {
            mean: Some(mean),
            std_dev,
            min: Some(min),
            max: Some(max),
        }
    }

    /// mean + std_dev
    pub fn upper(&self) -> Option<f64> {
        Some(self.mean? + self.std_dev?)
    }

    /// mean - std_dev
    pub fn lower(&self) -> Option<f64> {
        Some(self.mean? - self.std_dev?)
    }
}

/// Per-region, per-month summaries over all fiscal years.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    summaries: BTreeMap<(Region, Month), Summary>,
}

impl Statistics {
    pub fn aggregate(tables: &RegionTables) -> Statistics {
        let mut summaries = BTreeMap::new();
        for (region, table) in tables.iter() {
            for &month in table.months() {
                let summary = Summary::from_values(&table.row_values(month));
                summaries.insert((region, month), summary);
            }
        }
        Statistics { summaries }
    }

    /// Unknown cells summarize to all-absent.
    pub fn summary(&self, region: Region, month: Month) -> Summary {
        self.summaries
            .get(&(region, month))
            .copied()
            .unwrap_or_default()
    }

    pub fn insert(&mut self, region: Region, month: Month, summary: Summary) {
        self.summaries.insert((region, month), summary);
    }
}
