use crate::dataset::{RowDiagnostic, SourceRow, SourceTable, TableReader};
use crate::error::StaffingError;
use crate::normalize::raw::RawValue;

/// Comma- or tab-separated tables, read with the `csv` crate.
#[derive(Debug, Clone)]
pub struct DelimitedReader {
    delimiter: u8,
}

impl DelimitedReader {
    pub fn csv() -> Self {
        Self { delimiter: b',' }
    }

    pub fn tsv() -> Self {
        Self { delimiter: b'\t' }
    }
}

impl TableReader for DelimitedReader {
    fn read_table(&self, bytes: &[u8]) -> Result<SourceTable, StaffingError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut table = SourceTable {
            headers,
            ..Default::default()
        };

        for (idx, record) in reader.records().enumerate() {
            // Header is line 1.
            let line = idx + 2;
            match record {
                Ok(record) => table.rows.push(SourceRow {
                    line,
                    cells: record.iter().map(RawValue::from_cell).collect(),
                }),
                Err(e) => {
                    log::warn!("line {line}: unreadable row: {e}");
                    table.diagnostics.push(RowDiagnostic {
                        line,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(table)
    }

    fn backend_name(&self) -> &str {
        match self.delimiter {
            b'\t' => "tsv",
            _ => "csv",
        }
    }
}
