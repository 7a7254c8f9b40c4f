//! Read a rendered table back and check its structural invariants.
//!
//! Parsing goes through a real CSV reader, so quoting is undone exactly the
//! way a downstream importer would see it. The raw bytes of each row are
//! kept alongside so the quoting itself can be checked too.
use crate::fileno::{is_plain_decimal, parse_file_no, Category};
use crate::table::COLUMNS;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Issues kept verbatim in the report; the rest are only counted.
pub const ISSUE_PREVIEW_LIMIT: usize = 20;

/// Knobs describing how the table was generated.
#[derive(Debug, Default, Clone, Copy)]
pub struct VerifyOptions {
    /// With a cap, the last year of each category may be cut short.
    pub max_per_category: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    pub rows: usize,
    pub categories: usize,
    pub years: usize,
    pub numbers_per_year: Option<u32>,
    pub issue_count: usize,
    pub issues: Vec<String>,
    pub ok: bool,
}

impl VerifyReport {
    fn issue(&mut self, message: String) {
        self.issue_count += 1;
        if self.issues.len() < ISSUE_PREVIEW_LIMIT {
            self.issues.push(message);
        }
    }
}

fn label(category: Option<Category>) -> String {
    category.map_or_else(|| "unknown category".to_string(), |c| c.to_string())
}

type BlockKey = (Option<Category>, u32);

#[derive(Default)]
struct OrderState {
    block: Option<BlockKey>,
    last_number: u32,
    seen_blocks: HashSet<BlockKey>,
    finished_categories: HashSet<Option<Category>>,
    years: HashSet<u32>,
    /// Rows per category run, in table order.
    category_rows: Vec<(Option<Category>, usize)>,
    block_len: Option<u32>,
}

impl OrderState {
    fn category(&self) -> Option<Category> {
        self.block.and_then(|(category, _)| category)
    }

    /// Check the open year block before moving on; `next` is the category of
    /// the following block, `None` at end of table.
    fn close_block(
        &mut self,
        next: Option<Option<Category>>,
        options: VerifyOptions,
        report: &mut VerifyReport,
    ) {
        let Some((category, year)) = self.block else {
            return;
        };
        let continues = next == Some(category);
        let may_be_short = !continues && options.max_per_category.is_some();
        let len = self.last_number;
        match self.block_len {
            None if !may_be_short => self.block_len = Some(len),
            None => {}
            Some(expected) if len == expected => {}
            Some(expected) if len < expected && may_be_short => {}
            Some(expected) => report.issue(format!(
                "year {year} of {} has {len} numbers, expected {expected}",
                label(category)
            )),
        }
    }

    fn enter_block(&mut self, line: usize, key: BlockKey, report: &mut VerifyReport) {
        let (category, year) = key;
        let previous = self.block.map(|(previous, _)| previous);
        if previous != Some(category) {
            if let Some(previous) = previous {
                self.finished_categories.insert(previous);
            }
            if self.finished_categories.contains(&category) {
                report.issue(format!("line {line}: {} appears in two runs", label(category)));
            }
            self.category_rows.push((category, 0));
        }
        if !self.seen_blocks.insert(key) {
            report.issue(format!(
                "line {line}: year {year} appears in two blocks of {}",
                label(category)
            ));
        }
        self.years.insert(year);
        self.block = Some(key);
    }
}

fn trim_line_breaks(raw: &[u8]) -> &[u8] {
    let is_break = |b: &u8| matches!(b, b'\r' | b'\n');
    let start = raw.iter().position(|b| !is_break(b)).unwrap_or(raw.len());
    let end = raw.iter().rposition(|b| !is_break(b)).map_or(start, |idx| idx + 1);
    &raw[start..end]
}

/// Year and Number bare, FileNo wrapped in double quotes.
fn quoted_as_rendered(raw: &[u8], year: &str, number: &str) -> bool {
    let prefix = format!("{year},{number},\"");
    raw.len() > prefix.len() && raw.starts_with(prefix.as_bytes()) && raw.ends_with(b"\"")
}

/// Verify a table read from `reader`.
pub fn verify_table<R: Read>(mut reader: R, options: VerifyOptions) -> Result<VerifyReport> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).context("read table")?;
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes.as_slice());
    let mut report = VerifyReport::default();

    let headers = csv_reader.headers().context("read header row")?.clone();
    let header: Vec<&str> = headers.iter().collect();
    if header != COLUMNS {
        report.issue(format!(
            "header is {:?}, expected {:?}",
            header.join(","),
            COLUMNS.join(",")
        ));
    }

    let mut seen_ids = HashSet::new();
    let mut order = OrderState::default();
    let mut row = csv::StringRecord::new();
    // Header is line 1.
    let mut line = 1;

    loop {
        let start = csv_reader.position().byte() as usize;
        let more = csv_reader
            .read_record(&mut row)
            .with_context(|| format!("parse line {}", line + 1))?;
        if !more {
            break;
        }
        let end = csv_reader.position().byte() as usize;
        let raw = trim_line_breaks(bytes.get(start..end).unwrap_or_default());
        line += 1;
        report.rows += 1;

        if row.len() != COLUMNS.len() {
            report.issue(format!(
                "line {line}: {} fields, expected {}",
                row.len(),
                COLUMNS.len()
            ));
            continue;
        }
        if !is_plain_decimal(&row[0]) || !is_plain_decimal(&row[1]) {
            report.issue(format!(
                "line {line}: Year/Number must be plain decimal integers, got {:?} and {:?}",
                &row[0], &row[1]
            ));
            continue;
        }
        let (Ok(year), Ok(number)) = (row[0].parse::<u32>(), row[1].parse::<u32>()) else {
            report.issue(format!("line {line}: Year/Number do not fit in 32 bits"));
            continue;
        };
        if !quoted_as_rendered(raw, &row[0], &row[1]) {
            report.issue(format!("line {line}: expected bare Year/Number and a quoted FileNo"));
        }

        let file_no = &row[2];
        let parsed = parse_file_no(file_no);
        match parsed {
            Some((_, id_year, id_number)) if id_year == year && id_number == number => {}
            Some(_) => report.issue(format!(
                "line {line}: {file_no} does not match Year {year} and Number {number}"
            )),
            None => report.issue(format!("line {line}: malformed FileNo {file_no:?}")),
        }
        if !seen_ids.insert(file_no.to_string()) {
            report.issue(format!("line {line}: duplicate FileNo {file_no}"));
        }

        // Rows with an unreadable prefix stay in the current category run.
        let category = parsed
            .map(|(category, _, _)| category)
            .or_else(|| order.category());
        let key = (category, year);
        if order.block == Some(key) {
            if number != order.last_number + 1 {
                report.issue(format!(
                    "line {line}: number {number} follows {} in year {year}",
                    order.last_number
                ));
            }
        } else {
            order.close_block(Some(category), options, &mut report);
            order.enter_block(line, key, &mut report);
            if number != 1 {
                report.issue(format!("line {line}: year {year} starts at number {number}"));
            }
        }
        order.last_number = number;
        if let Some((_, rows)) = order.category_rows.last_mut() {
            *rows += 1;
        }
    }
    order.close_block(None, options, &mut report);

    if let Some(&(_, expected)) = order.category_rows.first() {
        for &(category, rows) in &order.category_rows[1..] {
            if rows != expected {
                report.issue(format!("{} has {rows} rows, expected {expected}", label(category)));
            }
        }
        if let Some(cap) = options.max_per_category.filter(|cap| expected > *cap) {
            report.issue(format!(
                "{} has {expected} rows, above max_per_category {cap}",
                label(order.category_rows[0].0)
            ));
        }
    }

    report.categories = order.category_rows.len();
    report.years = order.years.len();
    report.numbers_per_year = order.block_len;
    report.ok = report.issue_count == 0;
    Ok(report)
}

pub fn verify_file(path: &Path, options: VerifyOptions) -> Result<VerifyReport> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let report =
        verify_table(file, options).with_context(|| format!("verify {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        rows = report.rows,
        categories = report.categories,
        issues = report.issue_count,
        "verified table"
    );
    Ok(report)
}
