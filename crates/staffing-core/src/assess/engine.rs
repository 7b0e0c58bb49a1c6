use serde::{Deserialize, Serialize};

use crate::allocate::{self, admin, AllocationStrategy};
use crate::assess::aggregate::aggregate;
use crate::assess::outcome::OutputRecord;
use crate::assess::shortage;
use crate::dataset::Dataset;
use crate::error::StaffingError;
use crate::model::CanonicalSchool;
use crate::normalize::raw::RawRecord;
use crate::normalize::subjects::SubjectMapper;
use crate::normalize::canonical_school;
use crate::policy::schema::PolicyDef;
use crate::policy::validate_policy;

/// Policy switches that deployments disagree on.
///
/// `Default` matches the ministry dashboard: continuous allocation,
/// minor specializations counted alongside majors, signed shortages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    pub strategy: AllocationStrategy,
    /// Count minor specializations as actual staff, with the same weight as majors.
    pub include_minor: bool,
    /// Store surpluses as zero instead of negative shortages.
    pub clamp_negative: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            strategy: AllocationStrategy::Continuous,
            include_minor: true,
            clamp_negative: false,
        }
    }
}

/// Staffing engine: immutable policy data plus the selected options.
///
/// Holds no mutable state, so one engine can assess any number of rows
/// from any number of threads.
#[derive(Debug, Clone)]
pub struct StaffingEngine {
    policy: PolicyDef,
    mapper: SubjectMapper,
    options: EngineOptions,
}

impl StaffingEngine {
    pub fn new(policy: PolicyDef, options: EngineOptions) -> Result<Self, StaffingError> {
        validate_policy(&policy)?;
        let mapper = SubjectMapper::from_policy(&policy);
        Ok(Self {
            policy,
            mapper,
            options,
        })
    }

    pub fn policy(&self) -> &PolicyDef {
        &self.policy
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn mapper(&self) -> &SubjectMapper {
        &self.mapper
    }

    /// Assess one normalized school.
    pub fn evaluate(&self, school: &CanonicalSchool) -> OutputRecord {
        let major = self.mapper.normalize(&school.major_subjects);
        let minor = self.mapper.normalize(&school.minor_subjects);
        let actual = aggregate(&self.policy.subjects, &major, &minor, self.options.include_minor);

        let allocation = allocate::allocate(
            &self.policy,
            self.options.strategy,
            school.enrollment,
            school.staff_count,
        );
        let report = shortage::compute(
            &allocation.required,
            &actual,
            self.options.clamp_negative,
        );

        let mut unmapped = self.mapper.unmapped(&school.major_subjects);
        if self.options.include_minor {
            for label in self.mapper.unmapped(&school.minor_subjects) {
                if !unmapped.contains(&label) {
                    unmapped.push(label);
                }
            }
        }

        log::debug!(
            "assessed '{}': {} classes, policy total {}, {}",
            school.institution_name,
            allocation.classes,
            allocation.policy_total,
            report.recommendation
        );

        OutputRecord {
            institution_name: school.institution_name.clone(),
            enrollment: school.enrollment,
            district_code: school.district_code,
            staff_count: school.staff_count,
            strategy: self.options.strategy,
            classes: allocation.classes,
            streams: allocation.streams,
            policy_total: allocation.policy_total,
            likely_streams: allocation.likely_streams,
            administration: admin::administration(&self.policy, allocation.classes),
            actual_teachers: actual,
            required_teachers: allocation.required,
            shortages: report.shortages,
            recommendation: report.recommendation,
            unmapped_labels: unmapped,
        }
    }

    /// Normalize and assess one grouped row.
    pub fn evaluate_raw(&self, record: &RawRecord) -> OutputRecord {
        self.evaluate(&canonical_school(record))
    }

    /// Assess every row independently, in input order.
    pub fn evaluate_all(&self, records: &[RawRecord]) -> Vec<OutputRecord> {
        records.iter().map(|r| self.evaluate_raw(r)).collect()
    }

    /// Assess one institution of a loaded dataset by name.
    pub fn evaluate_institution(
        &self,
        dataset: &Dataset,
        name: &str,
    ) -> Result<OutputRecord, StaffingError> {
        dataset
            .find(name)
            .map(|record| self.evaluate_raw(record))
            .ok_or_else(|| StaffingError::UnknownInstitution(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assess::shortage::NO_RECRUITMENT;
    use crate::policy::builtin::load_preset;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn school(enrollment: u32, major: &[&str], minor: &[&str]) -> CanonicalSchool {
        CanonicalSchool {
            institution_name: "Test JSS".into(),
            enrollment,
            district_code: 42,
            staff_count: major.len() as u32,
            major_subjects: major.iter().map(|s| s.to_string()).collect(),
            minor_subjects: minor.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn engine(options: EngineOptions) -> StaffingEngine {
        StaffingEngine::new(load_preset("cbc").unwrap(), options).unwrap()
    }

    #[test]
    fn test_continuous_record() {
        let e = engine(EngineOptions::default());
        let out = e.evaluate(&school(187, &["MATHEMATICS", "MATHEMATICS", "FRENCH"], &[]));

        assert_eq!(out.institution_name, "Test JSS");
        assert_eq!(out.district_code, 42);
        assert_eq!(out.streams, 5);
        assert_eq!(out.required_teachers.get("English"), Some(&dec!(0.93)));
        assert_eq!(out.actual_teachers.get("Mathematic"), Some(&2));
        assert_eq!(out.actual_total(), 2);
        assert_eq!(out.required_total(), out.policy_total);
        assert_eq!(out.likely_streams, None);
        assert_eq!(out.unmapped_labels, vec!["FRENCH"]);
        assert!(out.actual_teachers.get("FRENCH").is_none());
        assert!(out.shortages.get("FRENCH").is_none());
    }

    #[test]
    fn test_every_map_has_exactly_catalog_subjects() {
        let e = engine(EngineOptions::default());
        let out = e.evaluate(&school(900, &["GERMAN"], &["HISTORY"]));
        let catalog: Vec<&str> = e.policy().subjects.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(out.required_teachers.subjects().collect::<Vec<_>>(), catalog);
        assert_eq!(out.actual_teachers.subjects().collect::<Vec<_>>(), catalog);
        assert_eq!(out.shortages.subjects().collect::<Vec<_>>(), catalog);
    }

    #[test]
    fn test_include_minor_switch() {
        let s = school(45, &["ENGLISH"], &["ENGLISH", "MATHS"]);
        let with_minor = engine(EngineOptions::default()).evaluate(&s);
        let majors_only = engine(EngineOptions {
            include_minor: false,
            ..EngineOptions::default()
        })
        .evaluate(&s);

        assert_eq!(with_minor.actual_teachers.get("English"), Some(&2));
        assert_eq!(with_minor.actual_teachers.get("Mathematic"), Some(&1));
        assert_eq!(majors_only.actual_teachers.get("English"), Some(&1));
        assert_eq!(majors_only.actual_teachers.get("Mathematic"), Some(&0));
    }

    #[test]
    fn test_clamp_switch() {
        let s = school(45, &["MATHEMATICS", "MATHEMATICS"], &[]);
        let signed = engine(EngineOptions::default()).evaluate(&s);
        let clamped = engine(EngineOptions {
            clamp_negative: true,
            ..EngineOptions::default()
        })
        .evaluate(&s);

        // 1 class: 5 / 27 = 0.19 required against 2 recorded
        assert_eq!(signed.shortages.get("Mathematic"), Some(&dec!(-1.81)));
        assert_eq!(clamped.shortages.get("Mathematic"), Some(&Decimal::ZERO));
        assert_eq!(signed.recommendation, clamped.recommendation);
        assert!(!signed.recommendation.contains("Mathematic"));
    }

    #[test]
    fn test_bracketed_record() {
        let e = engine(EngineOptions {
            strategy: AllocationStrategy::Bracketed,
            ..EngineOptions::default()
        });
        let out = e.evaluate(&school(1500, &["ENGLISH"; 12], &[]));
        assert_eq!(out.policy_total, dec!(76));
        // 12 recorded teachers fit the 2-stream establishment of 19
        assert_eq!(out.likely_streams, Some(2));
        assert_eq!(out.required_teachers.get("English"), Some(&dec!(0.37)));
        assert_eq!(out.shortages.get("English"), Some(&dec!(-11.63)));
    }

    #[test]
    fn test_bracketed_streams_ignore_minor_switch() {
        let s = school(150, &["ENGLISH"; 10], &["CRE"; 10]);
        let bracketed = |include_minor| {
            engine(EngineOptions {
                strategy: AllocationStrategy::Bracketed,
                include_minor,
                ..EngineOptions::default()
            })
            .evaluate(&s)
        };
        let with_minor = bracketed(true);
        let majors_only = bracketed(false);

        assert_eq!(with_minor.likely_streams, Some(1));
        assert_eq!(majors_only.likely_streams, Some(1));
        assert_eq!(with_minor.required_teachers, majors_only.required_teachers);
        assert_eq!(with_minor.actual_teachers.get("Religious Education"), Some(&10));
        assert_eq!(majors_only.actual_teachers.get("Religious Education"), Some(&0));
    }

    #[test]
    fn test_bracketed_streams_count_unmapped_teachers() {
        let out = engine(EngineOptions {
            strategy: AllocationStrategy::Bracketed,
            ..EngineOptions::default()
        })
        .evaluate(&school(150, &["FRENCH"; 30], &[]));

        assert_eq!(out.staff_count, 30);
        assert_eq!(out.actual_total(), 0);
        // 30 teachers exceed the 3-stream establishment of 28
        assert_eq!(out.likely_streams, Some(4));
    }

    #[test]
    fn test_zero_enrollment_needs_no_recruitment() {
        let out = engine(EngineOptions::default()).evaluate(&school(0, &[], &[]));
        assert_eq!(out.recommendation, NO_RECRUITMENT);
        assert!(!out.needs_recruitment());
    }

    #[test]
    fn test_administration_from_classes() {
        let out = engine(EngineOptions::default()).evaluate(&school(1500, &[], &[]));
        assert_eq!(out.classes, 34);
        assert_eq!(out.administration.deputy_principals, 2);
        assert_eq!(out.administration.senior_masters, 7);
    }

    #[test]
    fn test_subject_rows_follow_catalog() {
        let out = engine(EngineOptions::default()).evaluate(&school(187, &["ENGLISH"], &[]));
        let rows = out.subject_rows();
        assert_eq!(rows.len(), 9);
        assert_eq!(rows[0].subject, "English");
        assert_eq!(rows[0].actual, 1);
        assert_eq!(rows[0].required, dec!(0.93));
        assert_eq!(rows[0].shortage, dec!(-0.07));
    }

    #[test]
    fn test_recompute_is_identical() {
        let e = engine(EngineOptions::default());
        let s = school(640, &["SCIENCE", "CRE"], &["MUSIC"]);
        assert_eq!(e.evaluate(&s), e.evaluate(&s));
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let mut policy = load_preset("cbc").unwrap();
        policy.brackets.clear();
        assert!(StaffingEngine::new(policy, EngineOptions::default()).is_err());
    }
}
