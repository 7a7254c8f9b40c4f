//! Table sinks: staged files and plain writers.
use crate::fileno::FileNumbers;
use crate::stats::Summary;
use crate::staging::write_staged;
use crate::table::TableWriter;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Stream every record into `sink`, header first.
///
/// Group numbers are tracked in the returned summary only; the table keeps
/// its three columns.
pub fn write_table<W: Write>(
    sink: W,
    records: FileNumbers,
    records_per_group: u32,
) -> Result<Summary> {
    let mut writer = TableWriter::new(sink).context("write header")?;
    let mut summary = Summary::new(records_per_group);
    summary.add_bytes(writer.bytes());
    for record in records {
        let written = writer
            .write_record(&record)
            .with_context(|| format!("write row {}", record.file_no))?;
        summary.add_bytes(written);
        summary.observe(&record);
    }
    tracing::debug!(rows = writer.rows(), bytes = writer.bytes(), "table rows written");
    writer.finish().context("flush table")?;
    Ok(summary)
}

/// Write the table to `path` through a staged temp file.
pub fn write_table_atomic(
    path: &Path,
    records: FileNumbers,
    records_per_group: u32,
) -> Result<Summary> {
    let started = Instant::now();
    let expected = records.total();
    tracing::info!(path = %path.display(), records = expected, "writing table");
    let summary = write_staged(path, |sink| write_table(sink, records, records_per_group))?;
    tracing::info!(
        path = %path.display(),
        records = summary.total_records,
        bytes = summary.bytes,
        groups = summary.groups,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "table written"
    );
    Ok(summary)
}
