use std::collections::HashMap;

use crate::model::{ActualTeachers, SubjectMap};
use crate::policy::schema::SubjectDef;

/// Count recorded specialists per canonical subject.
///
/// Inputs are already-normalized subject names. With `include_minor`,
/// minor specializations count with the same weight as majors; without
/// it, only majors are counted. Subjects nobody teaches count as zero.
pub fn aggregate(
    catalog: &[SubjectDef],
    major: &[String],
    minor: &[String],
    include_minor: bool,
) -> ActualTeachers {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    let minor_iter = minor.iter().filter(|_| include_minor);
    for subject in major.iter().chain(minor_iter) {
        *counts.entry(subject.as_str()).or_insert(0) += 1;
    }

    SubjectMap::from_catalog(catalog, |subject| {
        counts.get(subject.name.as_str()).copied().unwrap_or(0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::builtin::load_preset;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_counts_majors() {
        let policy = load_preset("cbc").unwrap();
        let actual = aggregate(
            &policy.subjects,
            &names(&["Mathematic", "Mathematic"]),
            &[],
            true,
        );
        assert_eq!(actual.get("Mathematic"), Some(&2));
        assert_eq!(actual.get("English"), Some(&0));
        assert_eq!(actual.len(), 9);
    }

    #[test]
    fn test_minor_included_with_equal_weight() {
        let policy = load_preset("cbc").unwrap();
        let actual = aggregate(
            &policy.subjects,
            &names(&["Mathematic"]),
            &names(&["Mathematic", "English"]),
            true,
        );
        assert_eq!(actual.get("Mathematic"), Some(&2));
        assert_eq!(actual.get("English"), Some(&1));
    }

    #[test]
    fn test_minor_excluded() {
        let policy = load_preset("cbc").unwrap();
        let actual = aggregate(
            &policy.subjects,
            &names(&["Mathematic"]),
            &names(&["Mathematic", "English"]),
            false,
        );
        assert_eq!(actual.get("Mathematic"), Some(&1));
        assert_eq!(actual.get("English"), Some(&0));
    }

    #[test]
    fn test_non_catalog_names_ignored() {
        let policy = load_preset("cbc").unwrap();
        let actual = aggregate(&policy.subjects, &names(&["French"]), &[], true);
        assert!(actual.get("French").is_none());
        assert!(actual.iter().all(|(_, n)| *n == 0));
    }
}
