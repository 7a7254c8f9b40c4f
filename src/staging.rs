//! Staged file writes.
//!
//! Content is written to a temporary file beside the destination and renamed
//! into place only after the writer finishes, so the destination is either
//! the previous file or the complete new one.
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Run `write` against a buffered temp file, then publish it to `dest`.
pub fn write_staged<T, F>(dest: &Path, write: F) -> Result<T>
where
    F: FnOnce(&mut dyn Write) -> Result<T>,
{
    let parent = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    if dest.is_dir() {
        return Err(anyhow!("{} is a directory", dest.display()));
    }

    let mut staged = NamedTempFile::new_in(parent)
        .with_context(|| format!("create temp file in {}", parent.display()))?;
    let value = {
        let mut writer = BufWriter::new(&mut staged);
        let value = write(&mut writer)?;
        writer
            .flush()
            .with_context(|| format!("flush staged {}", dest.display()))?;
        value
    };
    staged
        .as_file()
        .sync_all()
        .with_context(|| format!("sync staged {}", dest.display()))?;
    tracing::debug!(
        staged = %staged.path().display(),
        dest = %dest.display(),
        "publishing staged file"
    );
    staged
        .persist(dest)
        .map_err(|err| err.error)
        .with_context(|| format!("publish {}", dest.display()))?;
    Ok(value)
}
