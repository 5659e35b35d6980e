//! Spreadsheet export of role snapshots.
//!
//! Records are flattened to a single sheet whose header row is the record
//! keys. Writing the file is the sink's business; [`CsvExportSink`] is the
//! one shipped here.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Sheet name used for every export.
pub const SHEET_NAME: &str = "Sheet1";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Record is not a flat object: {0}")]
    NotARecord(String),

    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write export '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One sheet of rows ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct Spreadsheet {
    pub base_name: String,
    pub sheet_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Spreadsheet {
    /// Build a sheet from serializable records.
    ///
    /// Columns follow first appearance across records; a record missing a
    /// column gets an empty cell.
    pub fn from_records<T: Serialize>(
        base_name: &str,
        records: &[T],
    ) -> Result<Self, ExportError> {
        let mut objects: Vec<Map<String, Value>> = Vec::with_capacity(records.len());
        for record in records {
            match serde_json::to_value(record)? {
                Value::Object(map) => objects.push(map),
                other => return Err(ExportError::NotARecord(other.to_string())),
            }
        }

        let mut columns: Vec<String> = Vec::new();
        for object in &objects {
            for key in object.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = objects
            .iter()
            .map(|object| {
                columns
                    .iter()
                    .map(|column| object.get(column).map(cell_text).unwrap_or_default())
                    .collect()
            })
            .collect();

        Ok(Self {
            base_name: base_name.to_string(),
            sheet_name: SHEET_NAME.to_string(),
            columns,
            rows,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Render as CSV text, header first.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();
        push_csv_line(&mut csv, &self.columns);
        for row in &self.rows {
            push_csv_line(&mut csv, row);
        }
        csv
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn push_csv_line(out: &mut String, cells: &[String]) {
    let line: Vec<String> = cells.iter().map(|c| escape_csv(c)).collect();
    out.push_str(&line.join(","));
    out.push('\n');
}

/// Receives finished sheets.
pub trait ExportSink: Send + Sync {
    /// Persist the sheet and return where it went.
    fn export(&self, sheet: &Spreadsheet) -> Result<PathBuf, ExportError>;
}

/// Writes `{directory}/{base_name}.csv`.
pub struct CsvExportSink {
    directory: PathBuf,
}

impl CsvExportSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl ExportSink for CsvExportSink {
    fn export(&self, sheet: &Spreadsheet) -> Result<PathBuf, ExportError> {
        let path = self.directory.join(format!("{}.csv", sheet.base_name));
        fs::write(&path, sheet.to_csv()).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), rows = sheet.row_count(), "Export written");
        Ok(path)
    }
}
