//! Running statistics over a generated sequence.
use crate::fileno::Record;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Records per group when numbering import groups.
pub const DEFAULT_RECORDS_PER_GROUP: u32 = 100;

/// Totals accumulated while records stream past.
///
/// Records are numbered in emission order across all categories and split
/// into groups of `records_per_group`; the group of the n-th record
/// (1-based) is `(n - 1) / records_per_group + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_records: usize,
    pub first_file_no: Option<String>,
    pub last_file_no: Option<String>,
    pub year_min: Option<u32>,
    pub year_max: Option<u32>,
    pub year_count: usize,
    pub numbers_per_year: u32,
    pub bytes: u64,
    pub registries: BTreeMap<String, usize>,
    pub land_uses: BTreeMap<String, usize>,
    pub categories: BTreeMap<String, usize>,
    pub records_per_group: u32,
    pub groups: usize,
    #[serde(skip)]
    years: BTreeSet<u32>,
}

impl Summary {
    pub fn new(records_per_group: u32) -> Self {
        Self {
            records_per_group,
            ..Self::default()
        }
    }

    /// Group of the most recently observed record; `None` before any record
    /// or when grouping is disabled.
    pub fn current_group(&self) -> Option<usize> {
        if self.records_per_group == 0 || self.total_records == 0 {
            return None;
        }
        Some((self.total_records - 1) / self.records_per_group as usize + 1)
    }

    pub fn observe(&mut self, record: &Record) {
        let category = record.category;
        self.total_records += 1;
        if let Some(group) = self.current_group() {
            self.groups = group;
        }
        if self.first_file_no.is_none() {
            self.first_file_no = Some(record.file_no.clone());
        }
        self.last_file_no = Some(record.file_no.clone());
        self.year_min = Some(self.year_min.map_or(record.year, |y| y.min(record.year)));
        self.year_max = Some(self.year_max.map_or(record.year, |y| y.max(record.year)));
        self.years.insert(record.year);
        self.year_count = self.years.len();
        self.numbers_per_year = self.numbers_per_year.max(record.number);
        *self
            .registries
            .entry(category.registry(record.year).as_str().to_string())
            .or_default() += 1;
        *self
            .land_uses
            .entry(category.land_use().as_str().to_string())
            .or_default() += 1;
        *self.categories.entry(category.prefix().to_string()).or_default() += 1;
    }

    pub fn add_bytes(&mut self, bytes: u64) {
        self.bytes += bytes;
    }

    /// Lines printed by the text summary, without trailing newlines.
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Total records: {}", self.total_records)];
        if let (Some(min), Some(max)) = (self.year_min, self.year_max) {
            lines.push(format!(
                "Years: {min} to {max} ({} years)",
                self.year_count
            ));
        }
        lines.push(format!("Numbers per year: {}", self.numbers_per_year));
        lines.push(format!("Size: {} bytes", self.bytes));
        if let Some(first) = &self.first_file_no {
            lines.push(format!("First record: {first}"));
        }
        if let Some(last) = &self.last_file_no {
            lines.push(format!("Last record: {last}"));
        }
        for (registry, count) in &self.registries {
            lines.push(format!("{registry}: {count} records"));
        }
        for (land_use, count) in &self.land_uses {
            lines.push(format!("{land_use}: {count} records"));
        }
        if self.categories.len() > 1 {
            for (category, count) in &self.categories {
                lines.push(format!("{category}: {count} records"));
            }
        }
        if self.records_per_group > 0 && self.groups > 0 {
            lines.push(format!(
                "Groups: {} ({} records per group)",
                self.groups, self.records_per_group
            ));
        }
        lines
    }
}
