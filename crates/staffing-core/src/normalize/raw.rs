use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A field value as it arrives from the grouping step.
///
/// Grouping several source rows per institution turns a logical scalar into
/// a list, and re-grouping turns lists into nested lists, so the same field
/// may show up in any of these shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Missing,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<RawValue>),
}

impl RawValue {
    /// Parse a single source cell. Blank cells and `NaN` markers are missing.
    pub fn from_cell(cell: &str) -> RawValue {
        let trimmed = cell.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
            return RawValue::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => RawValue::Number(n),
            _ => RawValue::Text(trimmed.to_string()),
        }
    }

    /// True for values that carry no data (null, NaN, blank text, empty list).
    pub fn is_missing(&self) -> bool {
        first_present(self).is_none()
    }

    /// Numeric reading of a scalar. Text is parsed, ignoring thousands separators.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) if n.is_finite() => Some(*n),
            RawValue::Text(s) => s
                .trim()
                .replace(',', "")
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Text reading of a scalar. Whole numbers render without a fraction.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            RawValue::Number(n) if n.is_finite() => {
                if n.fract() == 0.0 {
                    Some(format!("{}", *n as i64))
                } else {
                    Some(n.to_string())
                }
            }
            RawValue::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// One grouped institution row: field name -> raw value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    fields: BTreeMap<String, RawValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: RawValue) {
        self.fields.insert(field.into(), value);
    }

    pub fn with(mut self, field: impl Into<String>, value: RawValue) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&RawValue> {
        self.fields.get(field)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }
}

/// Resolve a field to its first present scalar, searching nested lists depth-first.
///
/// Returns `default` when the field is absent or holds nothing but missing values.
pub fn resolve_scalar<'a>(record: &'a RawRecord, field: &str, default: &'a RawValue) -> &'a RawValue {
    record
        .get(field)
        .and_then(first_present)
        .unwrap_or(default)
}

/// Resolve a field to a flat sequence of labels, dropping missing entries.
pub fn resolve_sequence(record: &RawRecord, field: &str) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(value) = record.get(field) {
        flatten_into(value, &mut out);
    }
    out
}

/// Number of grouped entries in a field, missing ones included.
///
/// Each leaf of a list counts once; a bare scalar counts once unless it
/// is missing. An absent field has no entries.
pub fn count_entries(record: &RawRecord, field: &str) -> usize {
    match record.get(field) {
        Some(RawValue::List(items)) => items.iter().map(count_leaves).sum(),
        Some(value) if value.is_missing() => 0,
        Some(_) => 1,
        None => 0,
    }
}

fn count_leaves(value: &RawValue) -> usize {
    match value {
        RawValue::List(items) => items.iter().map(count_leaves).sum(),
        _ => 1,
    }
}

fn first_present(value: &RawValue) -> Option<&RawValue> {
    match value {
        RawValue::Missing => None,
        RawValue::Number(n) if !n.is_finite() => None,
        RawValue::Text(s) if s.trim().is_empty() => None,
        RawValue::List(items) => items.iter().find_map(first_present),
        other => Some(other),
    }
}

fn flatten_into(value: &RawValue, out: &mut Vec<String>) {
    match value {
        RawValue::List(items) => {
            for item in items {
                flatten_into(item, out);
            }
        }
        scalar => {
            if let Some(text) = scalar.as_text() {
                out.push(text);
            }
        }
    }
}
