//! File-number categories, records, and the category/year/number enumerator.
//!
//! Identifiers are `PREFIX-year-number` with both integers in plain decimal.
//! The enumerator is lazy and `Clone`, so a full-scale run can be streamed
//! straight into a writer and restarted for a second pass.
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Separator between prefix, year, and number in an identifier.
pub const SEPARATOR: char = '-';

/// Prefix of every identifier in the canonical output artifact.
pub const DEFAULT_CATEGORY: Category = Category::ConAgRc;

/// First year of the canonical range.
pub const DEFAULT_START_YEAR: u32 = 1981;

/// Last year (inclusive) of the canonical range.
pub const DEFAULT_END_YEAR: u32 = 2025;

/// Numbers generated per year in the canonical range.
pub const DEFAULT_NUMBERS_PER_YEAR: u32 = 5000;

/// Land-use and registry category that prefixes a file number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "RES")]
    Res,
    #[serde(rename = "COM")]
    Com,
    #[serde(rename = "AG")]
    Ag,
    #[serde(rename = "RES-RC")]
    ResRc,
    #[serde(rename = "COM-RC")]
    ComRc,
    #[serde(rename = "AG-RC")]
    AgRc,
    #[serde(rename = "CON-RES")]
    ConRes,
    #[serde(rename = "CON-COM")]
    ConCom,
    #[serde(rename = "CON-AG")]
    ConAg,
    #[serde(rename = "CON-RES-RC")]
    ConResRc,
    #[serde(rename = "CON-COM-RC")]
    ConComRc,
    #[serde(rename = "CON-AG-RC")]
    ConAgRc,
}

/// Land use implied by a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum LandUse {
    Residential,
    Commercial,
    Agriculture,
}

impl LandUse {
    pub fn as_str(self) -> &'static str {
        match self {
            LandUse::Residential => "Residential",
            LandUse::Commercial => "Commercial",
            LandUse::Agriculture => "Agriculture",
        }
    }
}

/// Registry a file number is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Registry {
    One,
    Two,
    Three,
}

impl Registry {
    pub fn as_str(self) -> &'static str {
        match self {
            Registry::One => "Registry 1",
            Registry::Two => "Registry 2",
            Registry::Three => "Registry 3",
        }
    }
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Res,
        Category::Com,
        Category::Ag,
        Category::ResRc,
        Category::ComRc,
        Category::AgRc,
        Category::ConRes,
        Category::ConCom,
        Category::ConAg,
        Category::ConResRc,
        Category::ConComRc,
        Category::ConAgRc,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            Category::Res => "RES",
            Category::Com => "COM",
            Category::Ag => "AG",
            Category::ResRc => "RES-RC",
            Category::ComRc => "COM-RC",
            Category::AgRc => "AG-RC",
            Category::ConRes => "CON-RES",
            Category::ConCom => "CON-COM",
            Category::ConAg => "CON-AG",
            Category::ConResRc => "CON-RES-RC",
            Category::ConComRc => "CON-COM-RC",
            Category::ConAgRc => "CON-AG-RC",
        }
    }

    pub fn is_conversion(self) -> bool {
        matches!(
            self,
            Category::ConRes
                | Category::ConCom
                | Category::ConAg
                | Category::ConResRc
                | Category::ConComRc
                | Category::ConAgRc
        )
    }

    pub fn land_use(self) -> LandUse {
        match self {
            Category::Res | Category::ResRc | Category::ConRes | Category::ConResRc => {
                LandUse::Residential
            }
            Category::Com | Category::ComRc | Category::ConCom | Category::ConComRc => {
                LandUse::Commercial
            }
            Category::Ag | Category::AgRc | Category::ConAg | Category::ConAgRc => {
                LandUse::Agriculture
            }
        }
    }

    /// Conversion categories always land in registry 3; otherwise the year decides.
    pub fn registry(self, year: u32) -> Registry {
        if self.is_conversion() {
            return Registry::Three;
        }
        match year {
            1981..=1991 => Registry::One,
            _ => Registry::Two,
        }
    }

    /// Format the identifier for `(year, number)` under this category.
    pub fn file_no(self, year: u32, number: u32) -> String {
        format!("{}{SEPARATOR}{year}{SEPARATOR}{number}", self.prefix())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.prefix() == value)
            .ok_or_else(|| {
                let valid: Vec<&str> = Category::ALL.iter().map(|c| c.prefix()).collect();
                format!(
                    "unknown category `{value}` (expected one of: {})",
                    valid.join(", ")
                )
            })
    }
}

/// One generated `(year, number, identifier)` triple and the category it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub category: Category,
    pub year: u32,
    pub number: u32,
    pub file_no: String,
}

impl Record {
    pub fn new(category: Category, year: u32, number: u32) -> Self {
        Self {
            category,
            year,
            number,
            file_no: category.file_no(year, number),
        }
    }
}

/// Contiguous inclusive year list; empty when `start > end`.
///
/// Callers bound the span first (see `GeneratorConfig::validate`).
pub fn years_between(start: u32, end: u32) -> Vec<u32> {
    (start..=end).collect()
}

/// Lazy enumeration of every `(category, year, number)` combination.
///
/// Categories are the outer loop, then years, then numbers
/// `1..=numbers_per_year`; categories and years keep the order they were
/// supplied in. With a `max_per_category` cap each category stops after that
/// many records, possibly part-way through a year. An empty category or year
/// list, or a zero count, yields an empty sequence.
#[derive(Debug, Clone)]
pub struct FileNumbers {
    categories: Vec<Category>,
    years: Vec<u32>,
    numbers_per_year: u32,
    max_per_category: Option<usize>,
    category_index: usize,
    year_index: usize,
    next_number: u32,
    emitted_in_category: usize,
}

impl FileNumbers {
    pub fn new(category: Category, years: Vec<u32>, numbers_per_year: u32) -> Self {
        Self::with_categories(vec![category], years, numbers_per_year)
    }

    pub fn with_categories(
        categories: Vec<Category>,
        years: Vec<u32>,
        numbers_per_year: u32,
    ) -> Self {
        Self {
            categories,
            years,
            numbers_per_year,
            max_per_category: None,
            category_index: 0,
            year_index: 0,
            next_number: 1,
            emitted_in_category: 0,
        }
    }

    /// Stop each category after `cap` records.
    pub fn max_per_category(mut self, cap: Option<usize>) -> Self {
        self.max_per_category = cap;
        self
    }

    /// Records produced for each category.
    pub fn per_category(&self) -> usize {
        let full = self.years.len() * self.numbers_per_year as usize;
        match self.max_per_category {
            Some(cap) => full.min(cap),
            None => full,
        }
    }

    /// Total records the full sequence produces, independent of progress.
    pub fn total(&self) -> usize {
        self.categories.len() * self.per_category()
    }

    fn remaining(&self) -> usize {
        let per_category = self.per_category();
        if self.category_index >= self.categories.len() {
            return 0;
        }
        let categories_left = self.categories.len() - self.category_index - 1;
        let in_current = per_category.saturating_sub(self.emitted_in_category);
        categories_left * per_category + in_current
    }

    fn next_category(&mut self) {
        self.category_index += 1;
        self.year_index = 0;
        self.next_number = 1;
        self.emitted_in_category = 0;
    }
}

impl Iterator for FileNumbers {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        let per_category = self.per_category();
        if per_category == 0 {
            return None;
        }
        if self.emitted_in_category >= per_category {
            self.next_category();
        }
        let category = *self.categories.get(self.category_index)?;
        let year = *self.years.get(self.year_index)?;
        let record = Record::new(category, year, self.next_number);
        self.emitted_in_category += 1;
        if self.next_number == self.numbers_per_year {
            self.year_index += 1;
            self.next_number = 1;
        } else {
            self.next_number += 1;
        }
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FileNumbers {}

fn decimal_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(?:0|[1-9][0-9]*)$").expect("regex for decimals"))
}

/// True for an unsigned decimal with no sign, whitespace, or leading zeros.
pub fn is_plain_decimal(text: &str) -> bool {
    decimal_pattern().is_match(text)
}

fn file_no_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?P<prefix>[A-Z]+(?:-[A-Z]+)*)-(?P<year>0|[1-9][0-9]*)-(?P<number>0|[1-9][0-9]*)$",
        )
        .expect("regex for file numbers")
    })
}

/// Split an identifier back into its category, year, and number.
///
/// Returns `None` for unknown prefixes, leading zeros, surrounding
/// whitespace, or integers that overflow `u32`.
pub fn parse_file_no(text: &str) -> Option<(Category, u32, u32)> {
    let caps = file_no_pattern().captures(text)?;
    let category = caps.name("prefix")?.as_str().parse().ok()?;
    let year = caps.name("year")?.as_str().parse().ok()?;
    let number = caps.name("number")?.as_str().parse().ok()?;
    Some((category, year, number))
}

#[cfg(test)]
#[path = "fileno_tests.rs"]
mod tests;
