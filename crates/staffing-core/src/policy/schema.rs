use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A staffing policy: the subject catalog, label aliases and establishment tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Canonical subjects with weekly lessons per class, in canonical order.
    pub subjects: Vec<SubjectDef>,
    /// Weekly lessons per class not taught by a subject specialist.
    #[serde(default = "default_pastoral_lessons")]
    pub pastoral_lessons: u32,
    #[serde(default = "default_max_class_size")]
    pub max_class_size: u32,
    /// Average teaching periods per teacher per week.
    #[serde(default = "default_periods_per_teacher")]
    pub periods_per_teacher: u32,
    /// Enrollment covered by one stream when extrapolating past the bracket table.
    #[serde(default = "default_enrollment_per_stream")]
    pub enrollment_per_stream: u32,
    /// Establishment added per stream past the bracket table.
    #[serde(default = "default_teachers_per_stream")]
    pub teachers_per_stream: u32,
    /// Free-text specialization label (upper case) -> canonical subject name.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    /// Ascending, non-overlapping establishment brackets.
    pub brackets: Vec<BracketDef>,
    /// Ascending administrative post table keyed by class count.
    pub admin_brackets: Vec<AdminBracketDef>,
}

impl PolicyDef {
    /// Sum of the catalog's weekly lessons per class.
    pub fn subject_lessons_per_class(&self) -> u32 {
        self.subjects.iter().map(|s| s.weekly_lessons).sum()
    }

    /// Timetabled lessons per class, including pastoral lessons.
    pub fn weekly_lessons_per_class(&self) -> u32 {
        self.subject_lessons_per_class() + self.pastoral_lessons
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectDef {
    pub name: String,
    pub weekly_lessons: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketDef {
    pub streams: u32,
    pub enrollment_min: u32,
    pub enrollment_max: u32,
    /// Total teaching establishment for schools in this bracket.
    pub establishment: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminBracketDef {
    /// Upper bound (inclusive) on the class count for this row.
    pub max_classes: u32,
    pub deputy_principals: u32,
    pub senior_masters: u32,
}

fn default_pastoral_lessons() -> u32 {
    1
}

fn default_max_class_size() -> u32 {
    45
}

fn default_periods_per_teacher() -> u32 {
    27
}

fn default_enrollment_per_stream() -> u32 {
    180
}

fn default_teachers_per_stream() -> u32 {
    8
}
