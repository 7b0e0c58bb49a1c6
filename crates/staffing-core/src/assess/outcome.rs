use rust_decimal::Decimal;
use serde::Serialize;

use crate::allocate::AllocationStrategy;
use crate::model::{ActualTeachers, AdminEstablishment, RequiredTeachers, SubjectMap, SubjectRow};

/// Staffing assessment for one institution.
///
/// Built fresh for every query and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    pub institution_name: String,
    pub enrollment: u32,
    /// District code of the teaching-staff record (TOD).
    pub district_code: i64,
    /// Recorded teachers, mapped or not.
    pub staff_count: u32,
    pub strategy: AllocationStrategy,
    /// Classes needed to seat the enrollment.
    pub classes: u32,
    /// Stream count the per-subject requirements were derived from.
    pub streams: u32,
    /// Total establishment mandated by the policy (CBE).
    pub policy_total: Decimal,
    /// Stream count implied by the recorded staff (bracketed strategy only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likely_streams: Option<u32>,
    pub administration: AdminEstablishment,
    pub actual_teachers: ActualTeachers,
    pub required_teachers: RequiredTeachers,
    /// Required minus actual per subject; clamped at zero if so configured.
    pub shortages: SubjectMap<Decimal>,
    pub recommendation: String,
    /// Specialization labels that did not map to a catalog subject.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unmapped_labels: Vec<String>,
}

impl OutputRecord {
    /// Total specialists counted against catalog subjects.
    pub fn actual_total(&self) -> u32 {
        self.actual_teachers.iter().map(|(_, n)| *n).sum()
    }

    /// Sum of the per-subject requirements.
    pub fn required_total(&self) -> Decimal {
        self.required_teachers.iter().map(|(_, v)| *v).sum()
    }

    /// True if the recommendation asks for recruitment.
    pub fn needs_recruitment(&self) -> bool {
        self.shortages.iter().any(|(_, v)| *v > Decimal::ZERO)
    }

    /// Flatten into one row per catalog subject, for tabular display.
    pub fn subject_rows(&self) -> Vec<SubjectRow> {
        self.required_teachers
            .iter()
            .map(|(subject, required)| SubjectRow {
                subject: subject.to_string(),
                actual: self.actual_teachers.get(subject).copied().unwrap_or(0),
                required: *required,
                shortage: self
                    .shortages
                    .get(subject)
                    .copied()
                    .unwrap_or(Decimal::ZERO),
            })
            .collect()
    }
}

/// Assessments for every institution in a dataset, with load diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentResult {
    pub records: Vec<OutputRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<crate::dataset::RowDiagnostic>,
}
