pub mod admin;
pub mod brackets;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::{RequiredTeachers, SubjectMap};
use crate::policy::schema::PolicyDef;

/// How enrollment is turned into a staffing level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationStrategy {
    /// One stream per `max_class_size` learners; the policy total is the
    /// sum of the per-subject requirements.
    Continuous,
    /// Policy total from the establishment bracket table; per-subject
    /// requirements from the stream count the recorded staff implies.
    Bracketed,
}

impl fmt::Display for AllocationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationStrategy::Continuous => write!(f, "continuous"),
            AllocationStrategy::Bracketed => write!(f, "bracketed"),
        }
    }
}

impl FromStr for AllocationStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "continuous" | "a" => Ok(AllocationStrategy::Continuous),
            "bracketed" | "b" => Ok(AllocationStrategy::Bracketed),
            other => Err(format!(
                "unknown allocation strategy '{other}' (expected 'continuous' or 'bracketed')"
            )),
        }
    }
}

/// Staffing level derived for one school.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// Classes needed to seat the enrollment.
    pub classes: u32,
    /// Stream count the per-subject requirements were derived from.
    pub streams: u32,
    pub policy_total: Decimal,
    /// Stream count inferred from the recorded staff (bracketed only).
    pub likely_streams: Option<u32>,
    pub required: RequiredTeachers,
}

/// Classes needed for `enrollment` learners at the policy's class size.
pub fn class_count(policy: &PolicyDef, enrollment: u32) -> u32 {
    enrollment.div_ceil(policy.max_class_size)
}

/// Required teachers per subject for `streams` streams.
///
/// Each subject needs `streams * weekly_lessons / periods_per_teacher`
/// teachers, rounded to two decimal places.
pub fn required_per_subject(policy: &PolicyDef, streams: u32) -> RequiredTeachers {
    let periods = Decimal::from(policy.periods_per_teacher);
    SubjectMap::from_catalog(&policy.subjects, |subject| {
        let lessons = Decimal::from(streams) * Decimal::from(subject.weekly_lessons);
        (lessons / periods).round_dp(2)
    })
}

/// Allocate required teachers for one school.
///
/// `staff_count` is only consulted by the bracketed strategy.
pub fn allocate(
    policy: &PolicyDef,
    strategy: AllocationStrategy,
    enrollment: u32,
    staff_count: u32,
) -> Allocation {
    let classes = class_count(policy, enrollment);

    match strategy {
        AllocationStrategy::Continuous => {
            let required = required_per_subject(policy, classes);
            let policy_total = required.iter().map(|(_, v)| *v).sum();
            Allocation {
                classes,
                streams: classes,
                policy_total,
                likely_streams: None,
                required,
            }
        }
        AllocationStrategy::Bracketed => {
            let streams = brackets::likely_streams(policy, staff_count);
            Allocation {
                classes,
                streams,
                policy_total: Decimal::from(brackets::policy_total(policy, enrollment)),
                likely_streams: Some(streams),
                required: required_per_subject(policy, streams),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::builtin::load_preset;
    use rust_decimal_macros::dec;

    fn policy() -> PolicyDef {
        load_preset("cbc").unwrap()
    }

    #[test]
    fn test_class_count() {
        let p = policy();
        assert_eq!(class_count(&p, 0), 0);
        assert_eq!(class_count(&p, 45), 1);
        assert_eq!(class_count(&p, 46), 2);
        assert_eq!(class_count(&p, 187), 5);
    }

    #[test]
    fn test_class_count_monotone() {
        let p = policy();
        let mut prev = 0;
        for e in 0..2000 {
            let c = class_count(&p, e);
            assert!(c >= prev);
            prev = c;
        }
    }

    #[test]
    fn test_continuous_187() {
        let a = allocate(&policy(), AllocationStrategy::Continuous, 187, 0);
        assert_eq!(a.streams, 5);
        assert_eq!(a.required.get("English"), Some(&dec!(0.93)));
        assert_eq!(a.required.get("Kiswahili/kenya sign language"), Some(&dec!(0.74)));
        assert_eq!(a.likely_streams, None);
    }

    #[test]
    fn test_continuous_total_is_sum_of_subjects() {
        let p = policy();
        for e in [0, 1, 45, 187, 500, 1234, 2999] {
            let a = allocate(&p, AllocationStrategy::Continuous, e, 0);
            let sum: Decimal = a.required.iter().map(|(_, v)| *v).sum();
            assert_eq!(a.policy_total, sum);
            assert_eq!(a.required.len(), 9);
        }
    }

    #[test]
    fn test_zero_enrollment_requires_nothing() {
        let a = allocate(&policy(), AllocationStrategy::Continuous, 0, 0);
        assert!(a.required.iter().all(|(_, v)| v.is_zero()));
        assert!(a.policy_total.is_zero());
    }

    #[test]
    fn test_bracketed_uses_table_and_staff() {
        let a = allocate(&policy(), AllocationStrategy::Bracketed, 1500, 19);
        assert_eq!(a.policy_total, dec!(76));
        assert_eq!(a.likely_streams, Some(2));
        assert_eq!(a.streams, 2);
        assert_eq!(a.classes, 34);
        // 2 * 5 / 27
        assert_eq!(a.required.get("Mathematic"), Some(&dec!(0.37)));
    }

    #[test]
    fn test_bracketed_policy_total_200() {
        let a = allocate(&policy(), AllocationStrategy::Bracketed, 200, 0);
        assert_eq!(a.policy_total, dec!(19));
    }

    #[test]
    fn test_strategy_parse_and_display() {
        assert_eq!(
            "Bracketed".parse::<AllocationStrategy>().unwrap(),
            AllocationStrategy::Bracketed
        );
        assert_eq!(AllocationStrategy::Continuous.to_string(), "continuous");
        assert!("weighted".parse::<AllocationStrategy>().is_err());
    }
}
