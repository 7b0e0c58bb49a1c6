use crate::dataset::{Dataset, RowDiagnostic};
use crate::error::StaffingError;
use crate::normalize::fields;
use crate::normalize::raw::{resolve_scalar, RawRecord, RawValue};

/// Read institution records that were grouped upstream.
///
/// Expects a JSON array of objects keyed by column name, where any value
/// may be a scalar, a list or a nested list. A required column that no
/// record carries fails the load with `MissingField`. Records lacking a
/// column the others carry, or lacking an institution name, are skipped
/// and reported.
pub fn read_grouped_json(bytes: &[u8]) -> Result<Dataset, StaffingError> {
    let records: Vec<RawRecord> = serde_json::from_slice(bytes)?;

    if !records.is_empty() {
        if let Some(field) = fields::REQUIRED
            .iter()
            .find(|f| !records.iter().any(|r| r.contains_field(f)))
        {
            return Err(StaffingError::MissingField {
                field: field.to_string(),
            });
        }
    }

    let mut dataset = Dataset::default();
    for (idx, record) in records.into_iter().enumerate() {
        let line = idx + 1;
        if let Some(field) = fields::REQUIRED
            .iter()
            .find(|f| !record.contains_field(f))
        {
            log::warn!("record {line}: skipping record without '{field}'");
            dataset.diagnostics.push(RowDiagnostic {
                line,
                reason: format!("missing field '{field}'"),
            });
            continue;
        }

        if resolve_scalar(&record, fields::INSTITUTION_NAME, &RawValue::Missing).is_missing() {
            log::warn!("record {line}: skipping record without institution name");
            dataset.diagnostics.push(RowDiagnostic {
                line,
                reason: "missing institution name".into(),
            });
            continue;
        }
        dataset.records.push(record);
    }

    Ok(dataset)
}
