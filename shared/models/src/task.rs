//! Task domain models for the BoQ extraction pipeline.
//!
//! This module defines the rows read from a bill-of-quantities sheet, the
//! group state carried between them, and the task records written out.

use serde::Serialize;
use std::fmt;

/// A design quantity as found in the "Khối lượng" column.
///
/// Quantities are not validated: a text cell is kept verbatim, so `1.500`
/// (one thousand five hundred) is never reread as a decimal.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(into = "String")]
pub enum Quantity {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl Quantity {
    /// Wrap raw cell text; only blank text becomes `Empty`
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self::Empty
        } else {
            Self::Text(trimmed.to_string())
        }
    }
}

impl From<Quantity> for String {
    fn from(quantity: Quantity) -> Self {
        quantity.to_string()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Number(value) => f.write_str(&format_number(*value)),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Render a number the way a spreadsheet user reads it: `100`, not `100.0`.
pub fn format_number(value: f64) -> String {
    // i64 holds every integral f64 below 2^53 exactly
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// One positional row of the source sheet, with every text field trimmed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputRow {
    /// 1-based sheet row number, header row included. Diagnostics only.
    pub row_number: usize,
    /// "STT" column
    pub sequence_id: String,
    /// "Mô tả công việc" column
    pub description: String,
    /// "Đơn vị tính" column
    pub unit: String,
    /// "Khối lượng" column
    pub quantity: Quantity,
}

impl InputRow {
    pub fn new(
        row_number: usize,
        sequence_id: impl AsRef<str>,
        description: impl AsRef<str>,
        unit: impl AsRef<str>,
        quantity: Quantity,
    ) -> Self {
        Self {
            row_number,
            sequence_id: sequence_id.as_ref().trim().to_string(),
            description: description.as_ref().trim().to_string(),
            unit: unit.as_ref().trim().to_string(),
            quantity,
        }
    }

    /// A row holding only a description, as header and total rows usually do
    pub fn description_only(row_number: usize, description: impl AsRef<str>) -> Self {
        Self::new(row_number, "", description, "", Quantity::Empty)
    }
}

/// The "HẠNG MỤC" group in effect while scanning rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupContext {
    pub group_code: String,
    pub group_name: String,
}

impl GroupContext {
    pub fn new(group_code: impl Into<String>, group_name: impl Into<String>) -> Self {
        Self {
            group_code: group_code.into(),
            group_name: group_name.into(),
        }
    }
}

/// One extracted task, written as a single CSV row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRecord {
    pub group_code: String,
    pub group_name: String,
    pub sub_code: String,
    pub task_name: String,
    pub unit: String,
    pub design_quantity: Quantity,
}

impl TaskRecord {
    /// Output column order
    pub const COLUMNS: [&'static str; 6] = [
        "group_code",
        "group_name",
        "sub_code",
        "task_name",
        "unit",
        "design_quantity",
    ];

    /// Build a record for a task row under the given group
    pub fn from_row(group: &GroupContext, row: &InputRow) -> Self {
        Self {
            group_code: group.group_code.clone(),
            group_name: group.group_name.clone(),
            sub_code: row.sequence_id.clone(),
            task_name: row.description.clone(),
            unit: row.unit.clone(),
            design_quantity: row.quantity.clone(),
        }
    }
}
