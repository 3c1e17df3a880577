use std::collections::BTreeMap;

use log::{debug, warn};
use regex::Regex;
use scraper::{Html, Node};

use crate::region::Region;

/// Placed between text nodes when the page is flattened.
pub const TEXT_DELIMITER: &str = "|";

/// Characters removed from the flattened text before matching.
const STRIPPED_CHARS: [char; 5] = [',', '\r', '\n', ':', '-'];

/// Trailing group every region pattern ends with.
const CUTOFF_TOKEN: &str = r"(\d+|current|c)";

/// A region's entry in a bulletin table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cutoff {
    Number(u64),
    /// No cutoff: every case number may proceed.
    Current,
}

impl Cutoff {
    /// The measurement recorded for this cutoff. `Current` has none.
    pub fn value(self) -> Option<u64> {
        match self {
            Cutoff::Number(n) => Some(n),
            Cutoff::Current => None,
        }
    }

    fn parse(token: &str) -> Option<Cutoff> {
        match token {
            "current" | "c" => Some(Cutoff::Current),
            digits => match digits.parse() {
                Ok(n) => Some(Cutoff::Number(n)),
                Err(e) => {
                    warn!("Cutoff {} is not a usable number: {}", digits, e);
                    None
                }
            },
        }
    }
}

/// Flatten an HTML page into the compact lowercase form the region patterns
/// are written against. Script contents are dropped.
pub fn normalize(html: &str) -> String {
    let document = Html::parse_document(html);
    let text = visible_text(&document).join(TEXT_DELIMITER);
    normalize_text(&text)
}

fn visible_text(document: &Html) -> Vec<&str> {
    document
        .root_element()
        .descendants()
        .filter(|node| {
            !node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .map_or(false, |el| el.name() == "script")
            })
        })
        .filter_map(|node| match node.value() {
            Node::Text(text) => Some(text.trim()),
            _ => None,
        })
        .filter(|text| !text.is_empty())
        .collect()
}

/// Text-only part of [`normalize`]. Non-ASCII characters are dropped, not
/// transliterated, so footnote marks never merge into a cutoff number.
pub fn normalize_text(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii)
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Locates one region's cutoff in normalized text. Patterns are tried in
/// order; each must capture the cutoff token in group 1.
#[derive(Debug, Clone)]
pub struct RegionMatcher {
    region: Region,
    patterns: Vec<Regex>,
}

impl RegionMatcher {
    pub fn new(region: Region, patterns: &[&str]) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RegionMatcher { region, patterns })
    }

    /// Add a fallback pattern for a page layout the existing ones miss.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.patterns.push(Regex::new(pattern)?);
        Ok(self)
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Raw cutoff token of the first matching pattern.
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.patterns
            .iter()
            .find_map(|pattern| pattern.captures(text)?.get(1))
            .map(|m| m.as_str())
    }
}

/// Built-in patterns, following the layout of the bulletin DV tables:
/// region name, the region abbreviation, then the cutoff.
fn default_patterns(region: Region) -> Vec<String> {
    let prefixes: &[&str] = match region {
        Region::Europe => &[r"europe\|*[eur]*\|*"],
        Region::Africa => &[r"africa\|*[af]*\|*"],
        Region::Asia => &[r"asia\|*[as]*\|*"],
        Region::Oceania => &[r"oceania\|*[oc]*\|*"],
        Region::NorthAmerica => &[
            r"northamerica\|*\(bahamas\)\|*[na]*\|*",
            r"northamerica\|*[na]*\|*",
        ],
        Region::SouthAmerica => &[r"southamerica\|*and\|*the\|*caribbean\|*[sa]*\|*"],
    };
    prefixes
        .iter()
        .map(|prefix| format!("{}{}", prefix, CUTOFF_TOKEN))
        .collect()
}

/// Cutoffs found on one page. Regions without a match are listed as missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    cutoffs: BTreeMap<Region, Cutoff>,
    missing: Vec<Region>,
}

impl Extraction {
    pub fn cutoff(&self, region: Region) -> Option<Cutoff> {
        self.cutoffs.get(&region).copied()
    }

    /// Table value for a region: absent when missing or current.
    pub fn value(&self, region: Region) -> Option<u64> {
        self.cutoff(region).and_then(Cutoff::value)
    }

    pub fn missing(&self) -> &[Region] {
        &self.missing
    }
}

#[derive(Debug, Clone)]
pub struct Extractor {
    matchers: Vec<RegionMatcher>,
}

impl Extractor {
    pub fn new(matchers: Vec<RegionMatcher>) -> Self {
        Extractor { matchers }
    }

    /// Replace the matcher for its region, or add it.
    pub fn set_matcher(&mut self, matcher: RegionMatcher) {
        match self
            .matchers
            .iter_mut()
            .find(|m| m.region == matcher.region)
        {
            Some(existing) => *existing = matcher,
            None => self.matchers.push(matcher),
        }
    }

    pub fn matcher(&self, region: Region) -> Option<&RegionMatcher> {
        self.matchers.iter().find(|m| m.region == region)
    }

    pub fn extract_page(&self, html: &str) -> Extraction {
        self.extract_text(&normalize(html))
    }

    /// Run every region matcher over already normalized text.
    pub fn extract_text(&self, text: &str) -> Extraction {
        let mut extraction = Extraction::default();
        for matcher in &self.matchers {
            match matcher.find(text).and_then(Cutoff::parse) {
                Some(cutoff) => {
                    debug!("{}: {:?}", matcher.region, cutoff);
                    extraction.cutoffs.insert(matcher.region, cutoff);
                }
                None => {
                    warn!("Missing {}...", matcher.region);
                    extraction.missing.push(matcher.region);
                }
            }
        }
        extraction
    }
}

impl Default for Extractor {
    fn default() -> Self {
        let matchers = Region::ALL
            .iter()
            .map(|&region| {
                let patterns = default_patterns(region);
                let patterns: Vec<&str> = patterns.iter().map(String::as_str).collect();
                RegionMatcher::new(region, &patterns).expect("built-in pattern should compile")
            })
            .collect();
        Extractor::new(matchers)
    }
}
