use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Months of a fiscal year, which starts in October.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    October,
    November,
    December,
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
}

impl Month {
    /// All months in fiscal order.
    pub const ALL: [Month; 12] = [
        Month::October,
        Month::November,
        Month::December,
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Month::October => "october",
            Month::November => "november",
            Month::December => "december",
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
            Month::July => "july",
            Month::August => "august",
            Month::September => "september",
        }
    }

    /// Month name with a leading capital, as some bulletin URLs spell it.
    pub fn title(self) -> String {
        let name = self.name();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Calendar month number, 1 for January.
    pub fn number(self) -> u32 {
        match self {
            Month::October => 10,
            Month::November => 11,
            Month::December => 12,
            Month::January => 1,
            Month::February => 2,
            Month::March => 3,
            Month::April => 4,
            Month::May => 5,
            Month::June => 6,
            Month::July => 7,
            Month::August => 8,
            Month::September => 9,
        }
    }

    /// October through December fall in the calendar year before the fiscal year.
    pub fn in_prior_calendar_year(self) -> bool {
        matches!(self, Month::October | Month::November | Month::December)
    }

    pub fn calendar_year(self, fiscal_year: i32) -> i32 {
        if self.in_prior_calendar_year() {
            fiscal_year - 1
        } else {
            fiscal_year
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Month {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Month::ALL
            .iter()
            .copied()
            .find(|m| m.name() == lower)
            .ok_or_else(|| format!("unknown month: {}", s))
    }
}

/// One bulletin: a month within a fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FiscalPeriod {
    pub fiscal_year: i32,
    pub month: Month,
}

impl FiscalPeriod {
    pub fn new(fiscal_year: i32, month: Month) -> Self {
        FiscalPeriod { fiscal_year, month }
    }

    pub fn calendar_year(&self) -> i32 {
        self.month.calendar_year(self.fiscal_year)
    }
}

impl fmt::Display for FiscalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "FY{} {} {}",
            self.fiscal_year,
            self.month,
            self.calendar_year()
        )
    }
}
