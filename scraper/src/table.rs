use std::ops::Range;

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use crate::extract::Extraction;
use crate::period::{FiscalPeriod, Month};
use crate::region::Region;

#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("fiscal year {0} is outside the table")]
    YearOutOfRange(i32),
    #[error("month {0} is not a row of the table")]
    UnknownMonth(Month),
}

/// Month-by-year grid of cutoff values for a single region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionTable {
    years: Range<i32>,
    months: Vec<Month>,
    // cells[month row][year column]
    cells: Vec<Vec<Option<u64>>>,
}

impl RegionTable {
    pub fn new(years: Range<i32>, months: &[Month]) -> Self {
        let columns = years.len();
        RegionTable {
            years,
            months: months.to_vec(),
            cells: vec![vec![None; columns]; months.len()],
        }
    }

    fn position(&self, fiscal_year: i32, month: Month) -> Result<(usize, usize), TableError> {
        let row = self
            .months
            .iter()
            .position(|&m| m == month)
            .ok_or(TableError::UnknownMonth(month))?;
        if !self.years.contains(&fiscal_year) {
            return Err(TableError::YearOutOfRange(fiscal_year));
        }
        Ok((row, fiscal_year.abs_diff(self.years.start) as usize))
    }

    /// Overwrite one cell; the last write wins.
    pub fn set_cell(
        &mut self,
        fiscal_year: i32,
        month: Month,
        value: Option<u64>,
    ) -> Result<(), TableError> {
        let (row, column) = self.position(fiscal_year, month)?;
        self.cells[row][column] = value;
        Ok(())
    }

    pub fn cell(&self, fiscal_year: i32, month: Month) -> Option<u64> {
        self.position(fiscal_year, month)
            .ok()
            .and_then(|(row, column)| self.cells[row][column])
    }

    /// Present values of one month across all years.
    pub fn row_values(&self, month: Month) -> Vec<f64> {
        self.months
            .iter()
            .position(|&m| m == month)
            .map(|row| {
                self.cells[row]
                    .iter()
                    .flatten()
                    .map(|&v| v as f64)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn months(&self) -> &[Month] {
        &self.months
    }
}

/// Serialized as `{ "<month>": { "<fiscal year>": value } }`.
impl Serialize for RegionTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.months.len()))?;
        for (month, row) in self.months.iter().zip(&self.cells) {
            map.serialize_entry(month.name(), &YearRow { years: self.years.clone(), row })?;
        }
        map.end()
    }
}

struct YearRow<'a> {
    years: Range<i32>,
    row: &'a [Option<u64>],
}

impl Serialize for YearRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.row.len()))?;
        for (year, value) in self.years.clone().zip(self.row) {
            map.serialize_entry(&year.to_string(), value)?;
        }
        map.end()
    }
}

/// One table per region, all sharing the same shape.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionTables {
    tables: Vec<RegionTable>,
}

impl RegionTables {
    pub fn new(years: Range<i32>, months: &[Month]) -> Self {
        RegionTables {
            tables: Region::ALL
                .iter()
                .map(|_| RegionTable::new(years.clone(), months))
                .collect(),
        }
    }

    pub fn table(&self, region: Region) -> &RegionTable {
        &self.tables[region.index()]
    }

    pub fn set_cell(
        &mut self,
        region: Region,
        fiscal_year: i32,
        month: Month,
        value: Option<u64>,
    ) -> Result<(), TableError> {
        self.tables[region.index()].set_cell(fiscal_year, month, value)
    }

    /// Write every region's value for a period.
    pub fn record(
        &mut self,
        period: &FiscalPeriod,
        extraction: &Extraction,
    ) -> Result<(), TableError> {
        for region in Region::ALL {
            self.set_cell(
                region,
                period.fiscal_year,
                period.month,
                extraction.value(region),
            )?;
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Region, &RegionTable)> {
        Region::ALL.into_iter().zip(&self.tables)
    }
}

/// Serialized as `{ "<region>": <table> }`.
impl Serialize for RegionTables {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tables.len()))?;
        for (region, table) in self.iter() {
            map.serialize_entry(region.key(), table)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Extractor;

    #[test]
    fn test_new_table_is_absent() {
        let table = RegionTable::new(2003..2006, &Month::ALL);
        for year in 2003..2006 {
            for month in Month::ALL {
                assert_eq!(table.cell(year, month), None);
            }
        }
        assert!(table.row_values(Month::October).is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let mut table = RegionTable::new(2003..2006, &Month::ALL);
        table.set_cell(2004, Month::March, Some(10)).unwrap();
        table.set_cell(2004, Month::March, Some(20)).unwrap();
        assert_eq!(table.cell(2004, Month::March), Some(20));
        table.set_cell(2004, Month::March, None).unwrap();
        assert_eq!(table.cell(2004, Month::March), None);
    }

    #[test]
    fn test_out_of_range() {
        let mut table = RegionTable::new(2003..2006, &[Month::October]);
        assert_eq!(
            table.set_cell(2006, Month::October, Some(1)),
            Err(TableError::YearOutOfRange(2006))
        );
        assert_eq!(
            table.set_cell(2004, Month::May, Some(1)),
            Err(TableError::UnknownMonth(Month::May))
        );
    }

    #[test]
    fn test_row_values_skip_absent() {
        let mut table = RegionTable::new(2003..2007, &Month::ALL);
        table.set_cell(2003, Month::June, Some(5)).unwrap();
        table.set_cell(2005, Month::June, Some(7)).unwrap();
        table.set_cell(2006, Month::July, Some(9)).unwrap();
        assert_eq!(table.row_values(Month::June), vec![5.0, 7.0]);
    }

    #[test]
    fn test_record_extraction() {
        let mut tables = RegionTables::new(2014..2016, &Month::ALL);
        let extraction = Extractor::default().extract_text("europe|eu|1850|asia|as|current");
        let period = FiscalPeriod::new(2015, Month::October);
        tables.record(&period, &extraction).unwrap();

        assert_eq!(tables.table(Region::Europe).cell(2015, Month::October), Some(1850));
        assert_eq!(tables.table(Region::Asia).cell(2015, Month::October), None);
        assert_eq!(tables.table(Region::Africa).cell(2015, Month::October), None);
    }

    #[test]
    fn test_tables_json_shape() {
        let mut tables = RegionTables::new(2014..2016, &[Month::October, Month::November]);
        tables
            .set_cell(Region::Oceania, 2015, Month::November, Some(875))
            .unwrap();

        let json = serde_json::to_value(&tables).unwrap();
        assert_eq!(json["oceania"]["november"]["2015"], 875);
        assert!(json["oceania"]["november"]["2014"].is_null());
        assert!(json["south_america"]["october"]["2014"].is_null());
    }
}
