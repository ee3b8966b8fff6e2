//! In-memory sheet tables and the workbook reader seam.
//!
//! Reading raw spreadsheet bytes is a collaborator concern; the core only
//! sees ordered headers and rows of header->cell text, with missing cells
//! represented as empty strings. The CSV form (semicolon-separated) is what
//! the extraction oracle consumes.

use ahash::AHashMap;
use itertools::Itertools;

use crate::error::SourceError;

/// Separator used for the CSV form of a sheet.
pub const CSV_SEPARATOR: char = ';';

/// One sheet of a workbook: ordered headers plus rows mapping header text to
/// cell text. A missing cell reads as the empty string.
#[derive(Debug, Clone, Default)]
pub struct SheetTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<AHashMap<String, String>>,
}

impl SheetTable {
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// Renders the sheet as semicolon-separated CSV text, one header line
    /// followed by one line per row, cells in header order.
    pub fn to_csv(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(self.headers.iter().map(|h| quote_field(h)).join(";"));
        for row in &self.rows {
            lines.push(
                self.headers
                    .iter()
                    .map(|header| quote_field(row.get(header).map(String::as_str).unwrap_or("")))
                    .join(";"),
            );
        }
        let mut csv = lines.join("\n");
        csv.push('\n');
        csv
    }

    /// Parses semicolon-separated CSV text into a sheet. The first record is
    /// the header line; rows shorter than the header list read missing cells
    /// as empty strings, surplus cells are dropped.
    pub fn from_csv(name: impl Into<String>, csv: &str) -> Self {
        let mut records = parse_csv_records(csv).into_iter();
        let headers = records.next().unwrap_or_default();
        let rows = records
            .map(|record| {
                headers
                    .iter()
                    .enumerate()
                    .map(|(i, header)| {
                        (header.clone(), record.get(i).cloned().unwrap_or_default())
                    })
                    .collect()
            })
            .collect();
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }
}

fn quote_field(field: &str) -> String {
    if field.contains(CSV_SEPARATOR) || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn parse_csv_records(csv: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = csv.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                CSV_SEPARATOR => record.push(std::mem::take(&mut field)),
                '\r' => {}
                '\n' => {
                    record.push(std::mem::take(&mut field));
                    if record.len() > 1 || !record[0].is_empty() {
                        records.push(std::mem::take(&mut record));
                    } else {
                        record.clear();
                    }
                }
                _ => field.push(c),
            }
        }
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    records
}

/// The workbook reader collaborator: ordered sheet names, and one sheet at a
/// time. An unreadable source signals a [`SourceError`] rather than an empty
/// result.
pub trait TableSource {
    fn sheet_names(&self) -> Result<Vec<String>, SourceError>;
    fn sheet(&self, name: &str) -> Result<SheetTable, SourceError>;
}

/// A workbook held entirely in memory. The batch extraction tests and the
/// CLI use this; production readers adapt their spreadsheet library to
/// [`TableSource`] the same way.
#[derive(Debug, Default)]
pub struct MemoryWorkbook {
    sheets: Vec<SheetTable>,
}

impl MemoryWorkbook {
    pub fn new(sheets: Vec<SheetTable>) -> Self {
        Self { sheets }
    }
}

impl TableSource for MemoryWorkbook {
    fn sheet_names(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.sheets.iter().map(|sheet| sheet.name.clone()).collect())
    }

    fn sheet(&self, name: &str) -> Result<SheetTable, SourceError> {
        self.sheets
            .iter()
            .find(|sheet| sheet.name == name)
            .cloned()
            .ok_or_else(|| SourceError::SheetNotFound(name.to_string()))
    }
}
