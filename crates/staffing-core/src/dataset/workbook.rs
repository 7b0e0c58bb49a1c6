use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use crate::dataset::{SourceRow, SourceTable, TableReader};
use crate::error::StaffingError;
use crate::normalize::raw::RawValue;

/// XLSX workbooks, read with `calamine`. Only the first sheet is used.
#[derive(Debug, Clone, Default)]
pub struct WorkbookReader;

impl TableReader for WorkbookReader {
    fn read_table(&self, bytes: &[u8]) -> Result<SourceTable, StaffingError> {
        let cursor = Cursor::new(bytes);
        let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
            .map_err(|e| StaffingError::InvalidDataset(format!("failed to open xlsx: {e}")))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| StaffingError::InvalidDataset("workbook has no sheets".into()))?
            .map_err(|e| StaffingError::InvalidDataset(format!("failed to read sheet: {e}")))?;

        let mut rows = range.rows();
        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row
                .iter()
                .map(|cell| cell_as_value(cell).as_text().unwrap_or_default())
                .collect(),
            None => return Err(StaffingError::InvalidDataset("sheet is empty".into())),
        };

        let rows = rows
            .enumerate()
            .map(|(idx, cells)| SourceRow {
                line: idx + 2,
                cells: cells.iter().map(cell_as_value).collect(),
            })
            .collect();

        Ok(SourceTable {
            headers,
            rows,
            diagnostics: Vec::new(),
        })
    }

    fn backend_name(&self) -> &str {
        "xlsx"
    }
}

fn cell_as_value(cell: &Data) -> RawValue {
    match cell {
        Data::String(s) => RawValue::from_cell(s),
        Data::Float(f) if f.is_finite() => RawValue::Number(*f),
        Data::Int(i) => RawValue::Number(*i as f64),
        Data::Bool(b) => RawValue::Bool(*b),
        Data::Empty | Data::Error(_) | Data::Float(_) => RawValue::Missing,
        other => RawValue::Text(format!("{other}")),
    }
}
