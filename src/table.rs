//! Delimited text rendering for generated records.
//!
//! Numeric cells are written bare, the identifier cell is always quoted, and
//! free text is quoted only when it would otherwise be ambiguous.
use crate::fileno::Record;
use std::io::{self, Write};

pub const DELIMITER: char = ',';
pub const QUOTE: char = '"';
pub const LINE_SEPARATOR: &str = "\n";

/// Fixed column order of every rendered table.
pub const COLUMNS: [&str; 3] = ["Year", "Number", "FileNo"];

/// A single field and its quoting policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell<'a> {
    Number(u32),
    /// Quoted only when it contains the delimiter, a quote, or a line break.
    Text(&'a str),
    /// Always quoted, independent of content.
    Quoted(&'a str),
}

impl Record {
    pub fn cells(&self) -> [Cell<'_>; 3] {
        [
            Cell::Number(self.year),
            Cell::Number(self.number),
            Cell::Quoted(&self.file_no),
        ]
    }
}

fn needs_quotes(text: &str) -> bool {
    text.chars()
        .any(|ch| ch == DELIMITER || ch == QUOTE || ch == '\r' || ch == '\n')
}

fn push_quoted(out: &mut String, text: &str) {
    out.push(QUOTE);
    for ch in text.chars() {
        if ch == QUOTE {
            out.push(QUOTE);
        }
        out.push(ch);
    }
    out.push(QUOTE);
}

/// Append one cell to `out` using its quoting policy.
pub fn push_cell(out: &mut String, cell: &Cell<'_>) {
    match cell {
        Cell::Number(value) => out.push_str(&value.to_string()),
        Cell::Text(text) if needs_quotes(text) => push_quoted(out, text),
        Cell::Text(text) => out.push_str(text),
        Cell::Quoted(text) => push_quoted(out, text),
    }
}

/// Render one line (without the line separator).
pub fn render_line(cells: &[Cell<'_>]) -> String {
    let mut line = String::new();
    for (idx, cell) in cells.iter().enumerate() {
        if idx > 0 {
            line.push(DELIMITER);
        }
        push_cell(&mut line, cell);
    }
    line
}

pub fn header_line() -> String {
    let cells = COLUMNS.map(Cell::Text);
    render_line(&cells)
}

/// Streams a header and rows to any writer, one terminated line at a time.
pub struct TableWriter<W: Write> {
    inner: W,
    rows: usize,
    bytes: u64,
}

impl<W: Write> TableWriter<W> {
    /// Create the writer and emit the header line.
    pub fn new(mut inner: W) -> io::Result<Self> {
        let header = header_line();
        inner.write_all(header.as_bytes())?;
        inner.write_all(LINE_SEPARATOR.as_bytes())?;
        Ok(Self {
            inner,
            rows: 0,
            bytes: (header.len() + LINE_SEPARATOR.len()) as u64,
        })
    }

    /// Write one record and return the number of bytes it took.
    pub fn write_record(&mut self, record: &Record) -> io::Result<u64> {
        let line = render_line(&record.cells());
        self.inner.write_all(line.as_bytes())?;
        self.inner.write_all(LINE_SEPARATOR.as_bytes())?;
        let written = (line.len() + LINE_SEPARATOR.len()) as u64;
        self.rows += 1;
        self.bytes += written;
        Ok(written)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Render records to a single blob: lines joined by the line separator.
pub fn render_table<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut lines = vec![header_line()];
    lines.extend(records.into_iter().map(|record| render_line(&record.cells())));
    lines.join(LINE_SEPARATOR)
}
