use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::{ActualTeachers, RequiredTeachers, SubjectMap};

pub const NO_RECRUITMENT: &str = "No recruitment needed";

/// Per-subject shortages and the recruitment recommendation built from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortageReport {
    pub shortages: SubjectMap<Decimal>,
    pub recommendation: String,
}

/// Diff required against actual teachers for every catalog subject.
///
/// The recommendation lists subjects with a positive shortage in catalog
/// order, each count truncated to whole teachers. Surpluses never appear
/// in the text, whether or not they are clamped in `shortages`.
pub fn compute(
    required: &RequiredTeachers,
    actual: &ActualTeachers,
    clamp_negative: bool,
) -> ShortageReport {
    let mut needs = Vec::new();

    let entries: Vec<(String, Decimal)> = required
        .iter()
        .map(|(subject, req)| {
            let have = actual.get(subject).copied().unwrap_or(0);
            let raw = (*req - Decimal::from(have)).round_dp(2);
            if raw > Decimal::ZERO {
                needs.push(format!("{} {}", raw.trunc(), subject));
            }
            let stored = if clamp_negative {
                raw.max(Decimal::ZERO)
            } else {
                raw
            };
            (subject.to_string(), stored)
        })
        .collect();

    let recommendation = if needs.is_empty() {
        NO_RECRUITMENT.to_string()
    } else {
        format!("Recruit {}", needs.join(", "))
    };

    ShortageReport {
        shortages: SubjectMap::from_entries(entries),
        recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::builtin::load_preset;
    use crate::policy::schema::SubjectDef;
    use rust_decimal_macros::dec;

    fn catalog() -> Vec<SubjectDef> {
        load_preset("cbc").unwrap().subjects
    }

    fn required(values: &[(&str, Decimal)]) -> RequiredTeachers {
        SubjectMap::from_catalog(&catalog(), |s| {
            values
                .iter()
                .find(|(name, _)| *name == s.name)
                .map(|(_, v)| *v)
                .unwrap_or(Decimal::ZERO)
        })
    }

    fn actual(values: &[(&str, u32)]) -> ActualTeachers {
        SubjectMap::from_catalog(&catalog(), |s| {
            values
                .iter()
                .find(|(name, _)| *name == s.name)
                .map(|(_, v)| *v)
                .unwrap_or(0)
        })
    }

    #[test]
    fn test_recommendation_lists_positive_shortages_in_catalog_order() {
        let report = compute(
            &required(&[("Mathematic", dec!(2.85)), ("English", dec!(1.5))]),
            &actual(&[]),
            false,
        );
        assert_eq!(report.recommendation, "Recruit 1 English, 2 Mathematic");
        assert_eq!(report.shortages.get("Mathematic"), Some(&dec!(2.85)));
        assert_eq!(report.shortages.len(), 9);
    }

    #[test]
    fn test_fractional_shortage_below_one_still_listed() {
        let report = compute(&required(&[("English", dec!(0.93))]), &actual(&[]), true);
        assert_eq!(report.recommendation, "Recruit 0 English");
    }

    #[test]
    fn test_no_recruitment_needed() {
        let report = compute(
            &required(&[("English", dec!(0.93))]),
            &actual(&[("English", 1)]),
            false,
        );
        assert_eq!(report.recommendation, NO_RECRUITMENT);
    }

    #[test]
    fn test_surplus_clamped() {
        let report = compute(
            &required(&[("Mathematic", dec!(0.93))]),
            &actual(&[("Mathematic", 3)]),
            true,
        );
        assert_eq!(report.shortages.get("Mathematic"), Some(&dec!(0)));
        assert!(report.shortages.iter().all(|(_, v)| *v >= Decimal::ZERO));
        assert_eq!(report.recommendation, NO_RECRUITMENT);
    }

    #[test]
    fn test_surplus_unclamped_is_negative_but_not_recommended() {
        let report = compute(
            &required(&[("Mathematic", dec!(0.93)), ("English", dec!(1.85))]),
            &actual(&[("Mathematic", 3)]),
            false,
        );
        assert_eq!(report.shortages.get("Mathematic"), Some(&dec!(-2.07)));
        assert_eq!(report.recommendation, "Recruit 1 English");
    }
}
