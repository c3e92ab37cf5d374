//! BoQ Row Classifier
//!
//! Sorts sheet rows into group headers ("HẠNG MỤC n: ..."), task rows
//! (hierarchical STT codes such as `1`, `1.2`, `2.3a`) and everything else.
//! The current group is threaded through the scan as an explicit accumulator,
//! so classification is a pure function of the input rows.

use regex::Regex;

use boq_models::{GroupContext, InputRow, TaskRecord};

/// Marker that identifies a group header row (compared against the uppercased description)
pub const GROUP_MARKER: &str = "HẠNG MỤC";

/// Lowercase fragments of unit-price and total-amount rows
const SKIP_MARKERS: [&str; 2] = ["đơn giá", "thành tiền"];

/// What a single row turned out to be
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Header row that opens a new group
    Header(GroupContext),
    /// Row mentions the group marker but does not follow the header pattern
    UnmatchedHeader,
    /// Blank, unit-price or total-amount row
    Skipped,
    /// Task row under the current group
    Task(TaskRecord),
    /// Description present but the STT is not a task code
    Dropped,
}

/// Row counts gathered during one classification pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationSummary {
    pub total_rows: usize,
    pub headers: usize,
    pub unmatched_headers: usize,
    pub skipped_rows: usize,
    pub dropped_rows: usize,
    pub tasks: usize,
}

/// Output of a classification pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub records: Vec<TaskRecord>,
    pub summary: ClassificationSummary,
}

pub struct RowClassifier {
    header_pattern: Regex,
    task_code_pattern: Regex,
}

impl Default for RowClassifier {
    fn default() -> Self {
        Self {
            // "HẠNG MỤC 3: Excavation", colon optional, any case
            header_pattern: Regex::new(r"(?i)^HẠNG MỤC\s*(\d+)\s*:?(.+)")
                .expect("valid header pattern"),
            // 1, 1.2, 2.3a; the suffix letter is lowercase only
            task_code_pattern: Regex::new(r"^\d+(?:\.\d+)*[a-z]?$")
                .expect("valid task code pattern"),
        }
    }
}

impl RowClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify every row in order, carrying the current group from header to header
    pub fn classify(&self, rows: &[InputRow]) -> Classification {
        let (_, classification) = rows.iter().fold(
            (GroupContext::default(), Classification::default()),
            |(group, mut acc), row| {
                acc.summary.total_rows += 1;

                let group = match self.classify_row(&group, row) {
                    RowOutcome::Header(next) => {
                        acc.summary.headers += 1;
                        tracing::debug!(
                            row = row.row_number,
                            group_code = %next.group_code,
                            group_name = %next.group_name,
                            "Group header"
                        );
                        next
                    }
                    RowOutcome::UnmatchedHeader => {
                        acc.summary.unmatched_headers += 1;
                        tracing::debug!(
                            row = row.row_number,
                            description = %row.description,
                            "Unrecognized group header"
                        );
                        group
                    }
                    RowOutcome::Skipped => {
                        acc.summary.skipped_rows += 1;
                        group
                    }
                    RowOutcome::Task(record) => {
                        acc.summary.tasks += 1;
                        acc.records.push(record);
                        group
                    }
                    RowOutcome::Dropped => {
                        acc.summary.dropped_rows += 1;
                        tracing::debug!(
                            row = row.row_number,
                            sequence_id = %row.sequence_id,
                            "Row dropped"
                        );
                        group
                    }
                };

                (group, acc)
            },
        );

        classification
    }

    /// Decide what one row is, given the group in effect before it
    pub fn classify_row(&self, group: &GroupContext, row: &InputRow) -> RowOutcome {
        let sequence_id = row.sequence_id.trim();
        let description = row.description.trim();

        if description.to_uppercase().contains(GROUP_MARKER) {
            return match self.parse_header(description) {
                Some(next) => RowOutcome::Header(next),
                None => RowOutcome::UnmatchedHeader,
            };
        }

        if is_skipped_description(description) {
            return RowOutcome::Skipped;
        }

        if self.task_code_pattern.is_match(sequence_id) {
            let normalized = InputRow::new(
                row.row_number,
                sequence_id,
                description,
                &row.unit,
                row.quantity.clone(),
            );
            return RowOutcome::Task(TaskRecord::from_row(group, &normalized));
        }

        RowOutcome::Dropped
    }

    /// Extract the group code and title-cased name from a header description
    pub fn parse_header(&self, description: &str) -> Option<GroupContext> {
        let caps = self.header_pattern.captures(description)?;
        let code = caps.get(1)?.as_str();
        let name = caps
            .get(2)?
            .as_str()
            .trim_matches(|c: char| c == ':' || c.is_whitespace());

        Some(GroupContext::new(code, title_case(name)))
    }

    pub fn is_task_code(&self, sequence_id: &str) -> bool {
        self.task_code_pattern.is_match(sequence_id)
    }
}

fn is_skipped_description(description: &str) -> bool {
    if description.is_empty() {
        return true;
    }

    let lowered = description.to_lowercase();
    SKIP_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Titlecase the first letter of every run of letters and lowercase the rest.
///
/// Any non-letter (space, digit, punctuation) starts a new word, so
/// `nền móng` becomes `Nền Móng` and `1st` becomes `1St`.
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                result.extend(c.to_lowercase());
            } else {
                push_titlecase(&mut result, c);
            }
            in_word = true;
        } else {
            result.push(c);
            in_word = false;
        }
    }

    result
}

/// Unicode titlecase differs from uppercase only for the Latin digraphs and `ß`
fn push_titlecase(out: &mut String, c: char) {
    match c {
        'Ǆ' | 'ǅ' | 'ǆ' => out.push('ǅ'),
        'Ǉ' | 'ǈ' | 'ǉ' => out.push('ǈ'),
        'Ǌ' | 'ǋ' | 'ǌ' => out.push('ǋ'),
        'Ǳ' | 'ǲ' | 'ǳ' => out.push('ǲ'),
        'ß' => out.push_str("Ss"),
        _ => out.extend(c.to_uppercase()),
    }
}
