//! BoQ (Bill of Quantities) Processing Module
//!
//! Extracts project task records from a bill-of-quantities sheet:
//! the parser reads rows, the classifier tracks "HẠNG MỤC" groups and keeps
//! task rows, the writer emits the CSV handed to downstream tools.

pub mod classifier;
pub mod parser;
pub mod pipeline;
pub mod writer;

pub use classifier::{title_case, Classification, ClassificationSummary, RowClassifier, RowOutcome};
pub use parser::{BoqFormat, ColumnNames, SheetParser};
pub use pipeline::{extract_file, ExtractionReport};
pub use writer::{write_tasks, write_tasks_file};
