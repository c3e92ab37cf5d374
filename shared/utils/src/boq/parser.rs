//! BoQ Sheet Parser
//!
//! Reads the first sheet of a bill-of-quantities workbook (or a CSV export of
//! it) into positional [`InputRow`]s. Columns are located by their header
//! names; a missing column is fatal.

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, DataType, Range, Reader};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use boq_models::{format_number, InputRow, Quantity};

use crate::error::{ExtractError, ExtractResult};

/// Supported BoQ input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoqFormat {
    Spreadsheet, // XLSX/XLSM/XLSB/XLS/ODS
    Csv,
}

impl BoqFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Spreadsheet),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Header names of the four columns the extractor reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub sequence_id: String,
    pub description: String,
    pub unit: String,
    pub quantity: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            sequence_id: "STT".to_string(),
            description: "Mô tả công việc".to_string(),
            unit: "Đơn vị tính".to_string(),
            quantity: "Khối lượng".to_string(),
        }
    }
}

/// Positions of the expected columns within the header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndex {
    sequence_id: usize,
    description: usize,
    unit: usize,
    quantity: usize,
}

/// Main BoQ sheet parser
#[derive(Debug, Clone, Default)]
pub struct SheetParser {
    columns: ColumnNames,
}

impl SheetParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a BoQ file from disk, format chosen by extension
    pub fn parse_path(&self, path: &Path) -> ExtractResult<Vec<InputRow>> {
        let source = path.display().to_string();
        let format = BoqFormat::from_extension(path)
            .ok_or_else(|| ExtractError::unsupported_format(&source))?;

        match format {
            BoqFormat::Spreadsheet => {
                // calamine wraps open failures per format; report them as plain I/O
                std::fs::metadata(path).map_err(|e| ExtractError::io(&source, e.to_string()))?;
                let mut workbook = open_workbook_auto(path)?;
                let range = first_sheet(&mut workbook, &source)?;
                self.rows_from_range(&range)
            }
            BoqFormat::Csv => {
                let file = std::fs::File::open(path)
                    .map_err(|e| ExtractError::io(&source, e.to_string()))?;
                self.parse_csv(file)
            }
        }
    }

    /// Parse a BoQ file from bytes. The spreadsheet kind is sniffed from the
    /// content, so xls, xlsb and ods bytes read the same as from disk.
    pub fn parse_bytes(
        &self,
        filename: &str,
        data: &[u8],
        format: Option<BoqFormat>,
    ) -> ExtractResult<Vec<InputRow>> {
        let format = format
            .or_else(|| BoqFormat::from_extension(Path::new(filename)))
            .ok_or_else(|| ExtractError::unsupported_format(filename))?;

        match format {
            BoqFormat::Spreadsheet => {
                let mut workbook = open_workbook_auto_from_rs(Cursor::new(data))?;
                let range = first_sheet(&mut workbook, filename)?;
                self.rows_from_range(&range)
            }
            BoqFormat::Csv => self.parse_csv(data),
        }
    }

    /// Parse CSV input; the first record is the header row
    fn parse_csv<R: Read>(&self, input: R) -> ExtractResult<Vec<InputRow>> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(input);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        let index = self.locate_columns(&headers)?;

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let text = |col: usize| record.get(col).unwrap_or("");

            rows.push(InputRow::new(
                idx + 2,
                text(index.sequence_id),
                text(index.description),
                text(index.unit),
                Quantity::from_text(text(index.quantity)),
            ));
        }

        tracing::debug!(rows = rows.len(), "Read CSV rows");
        Ok(rows)
    }

    /// Convert a worksheet range; the first row is the header row
    fn rows_from_range(&self, range: &Range<DataType>) -> ExtractResult<Vec<InputRow>> {
        // calamine ranges start at the first used cell, not at A1
        let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
        let mut rows_iter = range.rows();

        let headers: Vec<String> = rows_iter
            .next()
            .ok_or_else(|| ExtractError::workbook("Worksheet has no header row"))?
            .iter()
            .map(|cell| cell_text(cell).trim().to_string())
            .collect();
        let index = self.locate_columns(&headers)?;

        let empty = DataType::Empty;
        let rows: Vec<InputRow> = rows_iter
            .enumerate()
            .map(|(idx, row)| {
                let cell = |col: usize| row.get(col).unwrap_or(&empty);
                InputRow::new(
                    first_row + idx + 2,
                    cell_text(cell(index.sequence_id)),
                    cell_text(cell(index.description)),
                    cell_text(cell(index.unit)),
                    cell_quantity(cell(index.quantity)),
                )
            })
            .collect();

        tracing::debug!(rows = rows.len(), "Read worksheet rows");
        Ok(rows)
    }

    fn locate_columns(&self, headers: &[String]) -> ExtractResult<ColumnIndex> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let sequence_id = find(&self.columns.sequence_id);
        let description = find(&self.columns.description);
        let unit = find(&self.columns.unit);
        let quantity = find(&self.columns.quantity);

        match (sequence_id, description, unit, quantity) {
            (Some(sequence_id), Some(description), Some(unit), Some(quantity)) => {
                Ok(ColumnIndex {
                    sequence_id,
                    description,
                    unit,
                    quantity,
                })
            }
            _ => {
                let missing = [
                    (sequence_id, &self.columns.sequence_id),
                    (description, &self.columns.description),
                    (unit, &self.columns.unit),
                    (quantity, &self.columns.quantity),
                ]
                .into_iter()
                .filter(|(found, _)| found.is_none())
                .map(|(_, name)| name.clone());

                Err(ExtractError::missing_columns(missing))
            }
        }
    }
}

/// Only the first sheet is ever read
fn first_sheet<RS, R>(workbook: &mut R, source: &str) -> ExtractResult<Range<DataType>>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: std::fmt::Display,
{
    workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ExtractError::empty_workbook(source))?
        .map_err(|e| ExtractError::workbook(e.to_string()))
}

/// Text form of a cell; numbers lose a trailing `.0`
fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::Empty | DataType::Error(_) => String::new(),
        DataType::String(s) => s.clone(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) => format_number(*f),
        other => other.to_string(),
    }
}

fn cell_quantity(cell: &DataType) -> Quantity {
    match cell {
        DataType::Empty | DataType::Error(_) => Quantity::Empty,
        DataType::Int(i) => Quantity::Number(*i as f64),
        DataType::Float(f) => Quantity::Number(*f),
        DataType::String(s) => Quantity::from_text(s),
        other => Quantity::from_text(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "STT,Mô tả công việc,Đơn vị tính,Khối lượng\n";

    #[test]
    fn test_format_detection() {
        let detect = |name: &str| BoqFormat::from_extension(Path::new(name));

        assert_eq!(detect("PLHD.xlsx"), Some(BoqFormat::Spreadsheet));
        assert_eq!(detect("PLHD.XLS"), Some(BoqFormat::Spreadsheet));
        assert_eq!(detect("PLHD.ods"), Some(BoqFormat::Spreadsheet));
        assert_eq!(detect("export.csv"), Some(BoqFormat::Csv));
        assert_eq!(detect("notes.txt"), None);
        assert_eq!(detect("PLHD"), None);
    }

    #[test]
    fn test_csv_parsing() {
        let data = format!(
            "{HEADER},HẠNG MỤC 1: Sitework,,\n 1.1 ,Clear land ,m2,100\n1.2,Grade,m2,\n"
        );

        let rows = SheetParser::new().parse_bytes("boq.csv", data.as_bytes(), None).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].description, "HẠNG MỤC 1: Sitework");
        assert_eq!(rows[0].row_number, 2);
        assert_eq!(rows[1].sequence_id, "1.1");
        assert_eq!(rows[1].description, "Clear land");
        assert_eq!(rows[1].quantity, Quantity::Text("100".to_string()));
        assert_eq!(rows[2].quantity, Quantity::Empty);
    }

    #[test]
    fn test_columns_located_by_name() {
        let data =
            "Ghi chú,Khối lượng,STT,Đơn vị tính,Mô tả công việc\nx,20,2.1,m3,Pour footing\n";

        let rows = SheetParser::new().parse_bytes("boq.csv", data.as_bytes(), None).unwrap();

        assert_eq!(rows[0].sequence_id, "2.1");
        assert_eq!(rows[0].description, "Pour footing");
        assert_eq!(rows[0].unit, "m3");
        assert_eq!(rows[0].quantity.to_string(), "20");
    }

    #[test]
    fn test_short_records_are_padded() {
        let data = format!("{HEADER}1.1,Clear land\n");

        let rows = SheetParser::new().parse_bytes("boq.csv", data.as_bytes(), None).unwrap();

        assert_eq!(rows[0].unit, "");
        assert_eq!(rows[0].quantity, Quantity::Empty);
    }

    #[test]
    fn test_missing_columns_are_fatal() {
        let data = "STT,Mô tả công việc\n1,Clear land\n";

        let error = SheetParser::new()
            .parse_bytes("boq.csv", data.as_bytes(), None)
            .unwrap_err();

        assert_eq!(
            error,
            ExtractError::missing_columns(["Đơn vị tính", "Khối lượng"])
        );
    }

    #[test]
    fn test_unknown_format_rejected() {
        let error = SheetParser::new().parse_bytes("boq.pdf", b"", None).unwrap_err();
        assert_eq!(error.error_code(), "UNSUPPORTED_FORMAT");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let error = SheetParser::new()
            .parse_path(Path::new("does-not-exist/PLHD.xlsx"))
            .unwrap_err();
        assert_eq!(error.error_code(), "IO_ERROR");
    }

    #[test]
    fn test_text_quantities_pass_through_verbatim() {
        let data = format!(
            "{HEADER}{}{}{}",
            "1.1,Cốt thép,kg,1.500\n",
            "1.2,Bê tông,m3, 0100 \n",
            "1.3,Ván khuôn,m2,12.50\n"
        );

        let rows = SheetParser::new().parse_bytes("boq.csv", data.as_bytes(), None).unwrap();
        let quantities: Vec<String> = rows.iter().map(|r| r.quantity.to_string()).collect();

        assert_eq!(quantities, vec!["1.500", "0100", "12.50"]);
    }

    #[test]
    fn test_unreadable_spreadsheet_bytes() {
        let error = SheetParser::new()
            .parse_bytes("PLHD.xls", b"not a workbook", None)
            .unwrap_err();
        assert_eq!(error.error_code(), "WORKBOOK_ERROR");
    }

    #[test]
    fn test_cell_conversion() {
        assert_eq!(cell_text(&DataType::Float(1.0)), "1");
        assert_eq!(cell_text(&DataType::Float(2.5)), "2.5");
        assert_eq!(cell_text(&DataType::Int(3)), "3");
        assert_eq!(cell_text(&DataType::Empty), "");
        assert_eq!(cell_quantity(&DataType::Float(12.75)), Quantity::Number(12.75));
        assert_eq!(cell_quantity(&DataType::String(" ".to_string())), Quantity::Empty);

        for raw in ["1.500", "0100", "tạm tính"] {
            let quantity = cell_quantity(&DataType::String(raw.to_string()));
            assert_eq!(quantity, Quantity::Text(raw.to_string()));
        }
    }
}
