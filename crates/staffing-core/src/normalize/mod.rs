pub mod raw;
pub mod subjects;

use crate::model::CanonicalSchool;
use raw::{count_entries, resolve_scalar, resolve_sequence, RawRecord, RawValue};

/// Source column names.
pub mod fields {
    pub const INSTITUTION_NAME: &str = "Institution_Name";
    pub const TOTAL_ENROLMENT: &str = "TotalEnrolment";
    pub const TOD: &str = "TOD";
    pub const MAJOR_SUBJECT: &str = "MajorSubject";
    pub const MINOR_SUBJECT: &str = "MinorSubject";

    /// Columns every dataset must provide.
    pub const REQUIRED: &[&str] = &[
        INSTITUTION_NAME,
        TOTAL_ENROLMENT,
        TOD,
        MAJOR_SUBJECT,
        MINOR_SUBJECT,
    ];
}

/// Normalize one grouped row into a `CanonicalSchool`.
///
/// Never fails: malformed values fall back to safe defaults
/// (enrollment 0, district code 0, empty subject lists).
pub fn canonical_school(record: &RawRecord) -> CanonicalSchool {
    let missing = RawValue::Missing;

    let institution_name = resolve_scalar(record, fields::INSTITUTION_NAME, &missing)
        .as_text()
        .unwrap_or_else(|| "unknown".into());

    let enrollment = resolve_scalar(record, fields::TOTAL_ENROLMENT, &missing)
        .as_f64()
        .map(to_count)
        .unwrap_or(0);

    let district_code = resolve_scalar(record, fields::TOD, &missing)
        .as_f64()
        .map(|n| n.trunc() as i64)
        .unwrap_or(0);

    let school = CanonicalSchool {
        institution_name,
        enrollment,
        district_code,
        staff_count: u32::try_from(count_entries(record, fields::MAJOR_SUBJECT))
            .unwrap_or(u32::MAX),
        major_subjects: resolve_sequence(record, fields::MAJOR_SUBJECT),
        minor_subjects: resolve_sequence(record, fields::MINOR_SUBJECT),
    };
    log::debug!(
        "normalized '{}': enrollment {}, TOD {}, {} teacher(s), {} major / {} minor labels",
        school.institution_name,
        school.enrollment,
        school.district_code,
        school.staff_count,
        school.major_subjects.len(),
        school.minor_subjects.len()
    );
    school
}

/// Coerce a numeric reading to a non-negative whole count.
fn to_count(n: f64) -> u32 {
    if n <= 0.0 {
        0
    } else if n >= u32::MAX as f64 {
        u32::MAX
    } else {
        n.floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawValue {
        RawValue::Text(s.into())
    }

    #[test]
    fn test_grouped_row() {
        let rec = RawRecord::new()
            .with(fields::INSTITUTION_NAME, text("Kilimani JSS"))
            .with(
                fields::TOTAL_ENROLMENT,
                RawValue::List(vec![RawValue::Number(187.0), RawValue::Number(187.0)]),
            )
            .with(fields::TOD, RawValue::List(vec![RawValue::Number(3021.0)]))
            .with(
                fields::MAJOR_SUBJECT,
                RawValue::List(vec![text("MATHEMATICS"), text("ENGLISH")]),
            )
            .with(
                fields::MINOR_SUBJECT,
                RawValue::List(vec![text("SCIENCE"), RawValue::Missing]),
            );

        let school = canonical_school(&rec);
        assert_eq!(school.institution_name, "Kilimani JSS");
        assert_eq!(school.enrollment, 187);
        assert_eq!(school.district_code, 3021);
        assert_eq!(school.major_subjects, vec!["MATHEMATICS", "ENGLISH"]);
        assert_eq!(school.minor_subjects, vec!["SCIENCE"]);
        assert_eq!(school.staff_count, 2);
    }

    #[test]
    fn test_staff_count_includes_blank_majors() {
        let rec = RawRecord::new().with(
            fields::MAJOR_SUBJECT,
            RawValue::List(vec![text("FRENCH"), RawValue::Missing, text("ENGLISH")]),
        );
        let school = canonical_school(&rec);
        assert_eq!(school.staff_count, 3);
        assert_eq!(school.major_subjects, vec!["FRENCH", "ENGLISH"]);
    }

    #[test]
    fn test_non_numeric_enrollment_defaults_to_zero() {
        let rec = RawRecord::new().with(fields::TOTAL_ENROLMENT, text("n/a"));
        assert_eq!(canonical_school(&rec).enrollment, 0);
    }

    #[test]
    fn test_negative_enrollment_clamped() {
        let rec = RawRecord::new().with(fields::TOTAL_ENROLMENT, RawValue::Number(-12.0));
        assert_eq!(canonical_school(&rec).enrollment, 0);
    }

    #[test]
    fn test_textual_enrollment_parsed() {
        let rec = RawRecord::new().with(fields::TOTAL_ENROLMENT, text("1,500"));
        assert_eq!(canonical_school(&rec).enrollment, 1500);
    }

    #[test]
    fn test_empty_record_defaults() {
        let school = canonical_school(&RawRecord::new());
        assert_eq!(school.institution_name, "unknown");
        assert_eq!(school.enrollment, 0);
        assert_eq!(school.district_code, 0);
        assert_eq!(school.staff_count, 0);
        assert!(school.major_subjects.is_empty());
        assert!(school.minor_subjects.is_empty());
    }
}
