use std::fmt;

use serde::{Deserialize, Serialize};

/// DV lottery regions, in export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Europe,
    Africa,
    Asia,
    Oceania,
    NorthAmerica,
    SouthAmerica,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::Europe,
        Region::Africa,
        Region::Asia,
        Region::Oceania,
        Region::NorthAmerica,
        Region::SouthAmerica,
    ];

    /// Key used in exported field names.
    pub fn key(self) -> &'static str {
        match self {
            Region::Europe => "europe",
            Region::Africa => "africa",
            Region::Asia => "asia",
            Region::Oceania => "oceania",
            Region::NorthAmerica => "north_america",
            Region::SouthAmerica => "south_america",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Region::Europe => "Europe",
            Region::Africa => "Africa",
            Region::Asia => "Asia",
            Region::Oceania => "Oceania",
            Region::NorthAmerica => "North America",
            Region::SouthAmerica => "South America",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
