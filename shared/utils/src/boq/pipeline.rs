//! Read, classify, write.

use std::path::{Path, PathBuf};

use crate::config::ExtractorConfig;
use crate::error::ExtractResult;

use super::classifier::{ClassificationSummary, RowClassifier};
use super::parser::SheetParser;
use super::writer::write_tasks_file;

/// What one extraction run produced
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionReport {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub record_count: usize,
    pub summary: ClassificationSummary,
}

/// Run the whole extraction for the configured input and output paths.
///
/// Any read or write failure aborts the run; nothing is retried.
pub fn extract_file(config: &ExtractorConfig) -> ExtractResult<ExtractionReport> {
    let input_path = Path::new(&config.input_path);
    let output_path = Path::new(&config.output_path);

    tracing::info!(input = %input_path.display(), "Reading bill of quantities");
    let rows = SheetParser::new().parse_path(input_path)?;

    let classification = RowClassifier::new().classify(&rows);
    let summary = classification.summary;
    tracing::info!(
        rows = summary.total_rows,
        headers = summary.headers,
        tasks = summary.tasks,
        skipped = summary.skipped_rows,
        dropped = summary.dropped_rows,
        unmatched_headers = summary.unmatched_headers,
        "Classified rows"
    );

    write_tasks_file(output_path, &classification.records)?;

    Ok(ExtractionReport {
        input_path: input_path.to_path_buf(),
        output_path: output_path.to_path_buf(),
        record_count: classification.records.len(),
        summary,
    })
}
