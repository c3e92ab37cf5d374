//! Task CSV Writer
//!
//! Writes task records as UTF-8 CSV with a byte-order mark so spreadsheet
//! tools pick the right encoding for Vietnamese text.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use boq_models::TaskRecord;

use crate::error::{ExtractError, ExtractResult};

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write the header row and one row per record to `output`
pub fn write_tasks<W: Write>(mut output: W, records: &[TaskRecord]) -> ExtractResult<()> {
    output.write_all(UTF8_BOM)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(output);

    // Written explicitly so an empty extraction still produces a header
    writer.write_record(TaskRecord::COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write the records to it
pub fn write_tasks_file(path: &Path, records: &[TaskRecord]) -> ExtractResult<()> {
    let target = path.display().to_string();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ExtractError::io(&target, e.to_string()))?;
    }

    let file = File::create(path).map_err(|e| ExtractError::io(&target, e.to_string()))?;
    write_tasks(BufWriter::new(file), records)?;

    tracing::debug!(path = %target, records = records.len(), "Wrote task CSV");
    Ok(())
}
