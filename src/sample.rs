//! Console demo: a small sample table plus statistics for the full artifact.
use crate::config::GeneratorConfig;
use crate::fileno::{FileNumbers, Record, DEFAULT_CATEGORY};
use crate::output::write_table;
use crate::stats::Summary;
use crate::table::render_table;
use crate::util::human_bytes;
use anyhow::Result;
use std::io;

/// Years shown in the sample: the first two and the last of the full range.
pub const SAMPLE_YEARS: [u32; 3] = [1981, 1982, 2025];

pub fn sample_records(numbers: u32) -> Vec<Record> {
    FileNumbers::new(DEFAULT_CATEGORY, SAMPLE_YEARS.to_vec(), numbers).collect()
}

/// Statistics for the default artifact, computed by streaming into a sink.
pub fn full_scale_summary(config: &GeneratorConfig) -> Result<Summary> {
    write_table(io::sink(), config.file_numbers(), config.records_per_group)
}

pub fn render_sample(numbers: u32) -> Result<String> {
    let config = GeneratorConfig::default();
    let records = sample_records(numbers);
    let summary = full_scale_summary(&config)?;
    let years = config.effective_years();

    let mut out = vec![
        "=== FileNos Generator Sample Output ===".to_string(),
        String::new(),
        format!(
            "Sample CSV output (first {numbers} numbers from years {}):",
            SAMPLE_YEARS.map(|y| y.to_string()).join(", ")
        ),
        "---".to_string(),
        render_table(&records),
        "---".to_string(),
        String::new(),
        "Full file statistics:".to_string(),
    ];
    for line in summary.text_lines() {
        out.push(format!("- {line}"));
    }
    out.push(format!("- Estimated file size: {}", human_bytes(summary.bytes)));
    out.push(format!("- Filename: {}", config.output_path().display()));

    if let [first, second, ..] = years.as_slice() {
        out.push(String::new());
        out.push("Sample FileNo patterns:".to_string());
        if let Some(first_no) = &summary.first_file_no {
            out.push(format!("- First record: {first_no}"));
        }
        out.push(format!(
            "- Last record of {first}: {}",
            DEFAULT_CATEGORY.file_no(*first, config.numbers_per_year)
        ));
        out.push(format!(
            "- First record of {second}: {}",
            DEFAULT_CATEGORY.file_no(*second, 1)
        ));
        if let Some(last_no) = &summary.last_file_no {
            out.push(format!("- Last record overall: {last_no}"));
        }
    }
    Ok(out.join("\n"))
}
