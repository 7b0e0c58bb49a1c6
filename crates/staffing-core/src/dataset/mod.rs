pub mod delimited;
pub mod grouped_json;
pub mod workbook;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::StaffingError;
use crate::normalize::fields;
use crate::normalize::raw::{resolve_scalar, RawRecord, RawValue};

/// One flat source row, before grouping.
#[derive(Debug, Clone)]
pub struct SourceRow {
    /// 1-based line (or sheet row) number, header included.
    pub line: usize,
    pub cells: Vec<RawValue>,
}

/// A flat table as read from a CSV file or a worksheet.
#[derive(Debug, Clone, Default)]
pub struct SourceTable {
    pub headers: Vec<String>,
    pub rows: Vec<SourceRow>,
    /// Rows the reader could not decode.
    pub diagnostics: Vec<RowDiagnostic>,
}

/// A row that was skipped while loading, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowDiagnostic {
    pub line: usize,
    pub reason: String,
}

/// Trait for flat-table backends (CSV, XLSX).
pub trait TableReader: Send + Sync {
    /// Read a whole table from file bytes. The first row holds the headers.
    fn read_table(&self, bytes: &[u8]) -> Result<SourceTable, StaffingError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Grouped institution rows, ready for the engine.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<RawRecord>,
    pub diagnostics: Vec<RowDiagnostic>,
}

impl Dataset {
    /// Grouped row for one institution.
    pub fn find(&self, name: &str) -> Option<&RawRecord> {
        let wanted = name.trim();
        self.records
            .iter()
            .find(|r| institution_name(r).as_deref() == Some(wanted))
    }

    /// Institution names in dataset order.
    pub fn institution_names(&self) -> Vec<String> {
        self.records.iter().filter_map(institution_name).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn institution_name(record: &RawRecord) -> Option<String> {
    resolve_scalar(record, fields::INSTITUTION_NAME, &RawValue::Missing).as_text()
}

/// Fail with `MissingField` unless every required column is present.
pub fn check_required_columns(headers: &[String]) -> Result<(), StaffingError> {
    for field in fields::REQUIRED {
        if !headers.iter().any(|h| h == field) {
            return Err(StaffingError::MissingField {
                field: field.to_string(),
            });
        }
    }
    Ok(())
}

/// Group flat rows by institution name, one record per institution.
///
/// Every column except the name becomes a list of the grouped cell values,
/// in source order. Institutions come out sorted by name. Rows without a
/// name are skipped and reported.
pub fn group_by_institution(table: SourceTable) -> Result<Dataset, StaffingError> {
    check_required_columns(&table.headers)?;

    let name_idx = table
        .headers
        .iter()
        .position(|h| h == fields::INSTITUTION_NAME)
        .ok_or_else(|| StaffingError::MissingField {
            field: fields::INSTITUTION_NAME.to_string(),
        })?;

    let mut diagnostics = table.diagnostics;
    let mut groups: BTreeMap<String, Vec<Vec<RawValue>>> = BTreeMap::new();

    for row in table.rows {
        let name = row.cells.get(name_idx).and_then(RawValue::as_text);
        match name {
            Some(name) => groups.entry(name).or_default().push(row.cells),
            None => {
                log::warn!("line {}: skipping row without institution name", row.line);
                diagnostics.push(RowDiagnostic {
                    line: row.line,
                    reason: "missing institution name".into(),
                });
            }
        }
    }

    let records = groups
        .into_iter()
        .map(|(name, rows)| {
            let mut record = RawRecord::new();
            for (col, header) in table.headers.iter().enumerate() {
                if col == name_idx {
                    continue;
                }
                let values = rows
                    .iter()
                    .map(|cells| cells.get(col).cloned().unwrap_or(RawValue::Missing))
                    .collect();
                record.insert(header.clone(), RawValue::List(values));
            }
            record.insert(fields::INSTITUTION_NAME, RawValue::Text(name));
            record
        })
        .collect();

    Ok(Dataset {
        records,
        diagnostics,
    })
}

/// Load and group a dataset file, choosing the backend by extension.
pub fn load_dataset(path: &Path) -> Result<Dataset, StaffingError> {
    let bytes = std::fs::read(path).map_err(|e| StaffingError::DatasetLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let dataset = match ext.as_str() {
        "csv" => read_grouped(&delimited::DelimitedReader::csv(), &bytes)?,
        "tsv" => read_grouped(&delimited::DelimitedReader::tsv(), &bytes)?,
        "xlsx" | "xlsm" => read_grouped(&workbook::WorkbookReader, &bytes)?,
        "json" => grouped_json::read_grouped_json(&bytes)?,
        other => return Err(StaffingError::UnsupportedDataset(other.to_string())),
    };

    log::info!(
        "loaded {} institution(s) from {} ({} row diagnostic(s))",
        dataset.len(),
        path.display(),
        dataset.diagnostics.len()
    );
    Ok(dataset)
}

/// Read a flat table with `reader` and group it by institution.
pub fn read_grouped(reader: &dyn TableReader, bytes: &[u8]) -> Result<Dataset, StaffingError> {
    let table = reader.read_table(bytes)?;
    log::debug!(
        "{} backend read {} row(s), {} column(s)",
        reader.backend_name(),
        table.rows.len(),
        table.headers.len()
    );
    group_by_institution(table)
}
