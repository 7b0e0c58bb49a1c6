use std::collections::HashMap;

use crate::policy::schema::PolicyDef;

/// Maps free-text specialization labels onto canonical catalog subjects.
#[derive(Debug, Clone)]
pub struct SubjectMapper {
    table: HashMap<String, String>,
}

impl SubjectMapper {
    /// Build the lookup table from a policy's label aliases.
    ///
    /// Catalog names themselves are accepted as labels too.
    pub fn from_policy(policy: &PolicyDef) -> Self {
        let mut table = HashMap::new();
        for subject in &policy.subjects {
            table.insert(label_key(&subject.name), subject.name.clone());
        }
        for (label, subject) in &policy.labels {
            table.insert(label_key(label), subject.clone());
        }
        Self { table }
    }

    /// Canonical subject for one label, if the label is known.
    pub fn canonical(&self, label: &str) -> Option<&str> {
        self.table.get(&label_key(label)).map(String::as_str)
    }

    /// Map labels to canonical subjects. Unknown labels are dropped.
    pub fn normalize(&self, labels: &[String]) -> Vec<String> {
        labels
            .iter()
            .filter_map(|label| match self.canonical(label) {
                Some(subject) => Some(subject.to_string()),
                None => {
                    log::debug!("dropping unmapped subject label '{}'", label.trim());
                    None
                }
            })
            .collect()
    }

    /// Labels `normalize` would drop, deduplicated in first-seen order.
    pub fn unmapped(&self, labels: &[String]) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for label in labels {
            let trimmed = label.trim();
            if self.canonical(trimmed).is_none() && !out.iter().any(|l| l == trimmed) {
                out.push(trimmed.to_string());
            }
        }
        out
    }
}

fn label_key(label: &str) -> String {
    label.trim().to_uppercase()
}
