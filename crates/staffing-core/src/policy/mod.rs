pub mod builtin;
pub mod schema;

use crate::error::StaffingError;
use schema::PolicyDef;
use std::collections::HashSet;
use std::path::Path;

/// Load a policy from a JSON file.
pub fn load_policy(path: &Path) -> Result<PolicyDef, StaffingError> {
    let content = std::fs::read_to_string(path).map_err(|e| StaffingError::PolicyLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let policy = parse_policy(&content, path)?;
    log::info!(
        "loaded policy '{}' (v{}) from {}",
        policy.name,
        policy.version,
        path.display()
    );
    Ok(policy)
}

/// Parse a policy from a JSON string.
pub fn parse_policy(json: &str, source: &Path) -> Result<PolicyDef, StaffingError> {
    let policy: PolicyDef = serde_json::from_str(json).map_err(|e| StaffingError::PolicyLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_policy(&policy)?;
    Ok(policy)
}

/// Parse a policy from a JSON string (no file path context).
pub fn parse_policy_str(json: &str) -> Result<PolicyDef, StaffingError> {
    let policy: PolicyDef = serde_json::from_str(json).map_err(StaffingError::Json)?;
    validate_policy(&policy)?;
    Ok(policy)
}

/// Validate that a policy is well-formed.
pub fn validate_policy(policy: &PolicyDef) -> Result<(), StaffingError> {
    if policy.subjects.is_empty() {
        return Err(StaffingError::PolicyInvalid(
            "subjects must not be empty".into(),
        ));
    }

    let mut seen = HashSet::new();
    for subject in &policy.subjects {
        if subject.name.trim().is_empty() {
            return Err(StaffingError::PolicyInvalid(
                "subject name must not be empty".into(),
            ));
        }
        if !seen.insert(subject.name.as_str()) {
            return Err(StaffingError::PolicyInvalid(format!(
                "subject '{}' is listed more than once",
                subject.name
            )));
        }
    }

    for (field, value) in [
        ("max_class_size", policy.max_class_size),
        ("periods_per_teacher", policy.periods_per_teacher),
        ("enrollment_per_stream", policy.enrollment_per_stream),
        ("teachers_per_stream", policy.teachers_per_stream),
    ] {
        if value == 0 {
            return Err(StaffingError::PolicyInvalid(format!(
                "{field} must be greater than zero"
            )));
        }
    }

    for (label, subject) in &policy.labels {
        if !seen.contains(subject.as_str()) {
            return Err(StaffingError::PolicyInvalid(format!(
                "label '{}' maps to unknown subject '{}'",
                label, subject
            )));
        }
    }

    validate_brackets(policy)?;

    if policy.admin_brackets.is_empty() {
        return Err(StaffingError::PolicyInvalid(
            "admin_brackets must not be empty".into(),
        ));
    }
    for pair in policy.admin_brackets.windows(2) {
        if pair[1].max_classes <= pair[0].max_classes {
            return Err(StaffingError::PolicyInvalid(format!(
                "admin_brackets must be ascending by max_classes ({} follows {})",
                pair[1].max_classes, pair[0].max_classes
            )));
        }
    }

    Ok(())
}

fn validate_brackets(policy: &PolicyDef) -> Result<(), StaffingError> {
    if policy.brackets.is_empty() {
        return Err(StaffingError::PolicyInvalid(
            "brackets must not be empty".into(),
        ));
    }

    for bracket in &policy.brackets {
        if bracket.enrollment_min > bracket.enrollment_max {
            return Err(StaffingError::PolicyInvalid(format!(
                "bracket for {} stream(s) has enrollment_min {} above enrollment_max {}",
                bracket.streams, bracket.enrollment_min, bracket.enrollment_max
            )));
        }
    }

    for pair in policy.brackets.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.enrollment_min <= prev.enrollment_max {
            return Err(StaffingError::PolicyInvalid(format!(
                "brackets overlap or are out of order: {}-{} then {}-{}",
                prev.enrollment_min, prev.enrollment_max, next.enrollment_min, next.enrollment_max
            )));
        }
        if next.streams <= prev.streams {
            return Err(StaffingError::PolicyInvalid(format!(
                "bracket stream counts must be ascending ({} follows {})",
                next.streams, prev.streams
            )));
        }
        if next.establishment < prev.establishment {
            return Err(StaffingError::PolicyInvalid(format!(
                "bracket establishment must not decrease ({} follows {})",
                next.establishment, prev.establishment
            )));
        }
    }

    Ok(())
}
