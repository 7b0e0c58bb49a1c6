use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::policy::schema::SubjectDef;

/// One institution after field normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalSchool {
    pub institution_name: String,
    pub enrollment: u32,
    pub district_code: i64,
    /// Recorded teachers: one per grouped major-specialization entry,
    /// whether or not its label maps to a catalog subject.
    pub staff_count: u32,
    /// Raw major-specialization labels, one per recorded teacher.
    pub major_subjects: Vec<String>,
    /// Raw minor-specialization labels, one per recorded teacher.
    pub minor_subjects: Vec<String>,
}

/// A value per catalog subject, kept in catalog order.
///
/// Only constructible from a catalog, so every map built by the engine
/// holds exactly the canonical subject set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectMap<T> {
    entries: Vec<(String, T)>,
}

impl<T> SubjectMap<T> {
    pub fn from_catalog(catalog: &[SubjectDef], mut value: impl FnMut(&SubjectDef) -> T) -> Self {
        Self {
            entries: catalog
                .iter()
                .map(|subject| (subject.name.clone(), value(subject)))
                .collect(),
        }
    }

    /// Entries must already follow catalog order.
    pub(crate) fn from_entries(entries: Vec<(String, T)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, subject: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(name, _)| name == subject)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(name, v)| (name.as_str(), v))
    }

    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Serialize> Serialize for SubjectMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Required teachers per subject (fractional, two decimal places).
pub type RequiredTeachers = SubjectMap<Decimal>;

/// Recorded specialist teachers per subject.
pub type ActualTeachers = SubjectMap<u32>;

/// Administrative posts implied by the number of classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminEstablishment {
    pub deputy_principals: u32,
    pub senior_masters: u32,
}

/// One line of the per-subject staffing table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRow {
    pub subject: String,
    pub actual: u32,
    pub required: Decimal,
    pub shortage: Decimal,
}
