//! Generator configuration.
//!
//! Values come from an optional JSON file and are then overridden by CLI
//! flags, so a run is fully described by the resolved config.
use crate::fileno::{
    years_between, Category, FileNumbers, DEFAULT_CATEGORY, DEFAULT_END_YEAR,
    DEFAULT_NUMBERS_PER_YEAR, DEFAULT_START_YEAR,
};
use crate::stats::DEFAULT_RECORDS_PER_GROUP;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Widest `start_year..=end_year` range a run may request.
pub const MAX_YEAR_SPAN: u32 = 10_000;

/// Resolved inputs for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Emitted in this order, each one covering every year before the next.
    pub categories: Vec<Category>,
    pub start_year: u32,
    pub end_year: u32,
    /// Explicit ordered year list; takes precedence over the range.
    pub years: Option<Vec<u32>>,
    pub numbers_per_year: u32,
    /// Stop each category after this many records.
    pub max_per_category: Option<usize>,
    /// Group size for summary group numbering; 0 disables grouping.
    pub records_per_group: u32,
    pub output: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            categories: vec![DEFAULT_CATEGORY],
            start_year: DEFAULT_START_YEAR,
            end_year: DEFAULT_END_YEAR,
            years: None,
            numbers_per_year: DEFAULT_NUMBERS_PER_YEAR,
            max_per_category: None,
            records_per_group: DEFAULT_RECORDS_PER_GROUP,
            output: None,
        }
    }
}

/// CLI-level overrides applied on top of a loaded config.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub categories: Option<Vec<Category>>,
    pub start_year: Option<u32>,
    pub end_year: Option<u32>,
    pub years: Option<Vec<u32>>,
    pub numbers_per_year: Option<u32>,
    pub max_per_category: Option<usize>,
    pub records_per_group: Option<u32>,
    pub output: Option<PathBuf>,
}

/// Load a config from JSON; missing fields fall back to defaults.
pub fn load_config(path: &Path) -> Result<GeneratorConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: GeneratorConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config JSON {}", path.display()))?;
    Ok(config)
}

impl GeneratorConfig {
    /// Layer CLI flags over the loaded values.
    ///
    /// A range bound given on the command line discards a year list loaded
    /// from the file, since the list would otherwise win over the range.
    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(categories) = overrides.categories {
            self.categories = categories;
        }
        if let Some(start_year) = overrides.start_year {
            self.start_year = start_year;
            self.years = None;
        }
        if let Some(end_year) = overrides.end_year {
            self.end_year = end_year;
            self.years = None;
        }
        if overrides.years.is_some() {
            self.years = overrides.years;
        }
        if let Some(numbers_per_year) = overrides.numbers_per_year {
            self.numbers_per_year = numbers_per_year;
        }
        if overrides.max_per_category.is_some() {
            self.max_per_category = overrides.max_per_category;
        }
        if let Some(records_per_group) = overrides.records_per_group {
            self.records_per_group = records_per_group;
        }
        if overrides.output.is_some() {
            self.output = overrides.output;
        }
        self
    }

    /// Years in emission order.
    pub fn effective_years(&self) -> Vec<u32> {
        match &self.years {
            Some(years) => years.clone(),
            None => years_between(self.start_year, self.end_year),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.numbers_per_year == 0 {
            return Err(anyhow!("numbers_per_year must be at least 1"));
        }
        if self.categories.is_empty() {
            return Err(anyhow!("categories list is empty"));
        }
        let mut seen_categories = HashSet::new();
        if let Some(dup) = self
            .categories
            .iter()
            .find(|category| !seen_categories.insert(**category))
        {
            return Err(anyhow!("category {dup} is listed more than once"));
        }
        if self.max_per_category == Some(0) {
            return Err(anyhow!("max_per_category must be at least 1"));
        }
        match &self.years {
            Some(years) => {
                if years.is_empty() {
                    return Err(anyhow!("years list is empty"));
                }
                let mut seen = HashSet::new();
                if let Some(dup) = years.iter().find(|year| !seen.insert(**year)) {
                    return Err(anyhow!("year {dup} is listed more than once"));
                }
            }
            None => {
                if self.start_year > self.end_year {
                    return Err(anyhow!(
                        "start_year {} is after end_year {}",
                        self.start_year,
                        self.end_year
                    ));
                }
                let span = u64::from(self.end_year - self.start_year) + 1;
                if span > u64::from(MAX_YEAR_SPAN) {
                    return Err(anyhow!(
                        "year range {}..={} spans {span} years (limit {MAX_YEAR_SPAN})",
                        self.start_year,
                        self.end_year
                    ));
                }
            }
        }
        Ok(())
    }

    /// Configured output path, or `FileNos_<first>_<last>.csv`.
    pub fn output_path(&self) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }
        let years = self.effective_years();
        match (years.first(), years.last()) {
            (Some(first), Some(last)) => PathBuf::from(format!("FileNos_{first}_{last}.csv")),
            _ => PathBuf::from("FileNos.csv"),
        }
    }

    /// The run's record sequence. Call [`GeneratorConfig::validate`] first:
    /// the year range is materialized here.
    pub fn file_numbers(&self) -> FileNumbers {
        FileNumbers::with_categories(
            self.categories.clone(),
            self.effective_years(),
            self.numbers_per_year,
        )
        .max_per_category(self.max_per_category)
    }
}
