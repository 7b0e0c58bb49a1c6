use crate::error::StaffingError;
use crate::policy::schema::PolicyDef;
use crate::policy::validate_policy;

const CBC_JUNIOR_SECONDARY_JSON: &str =
    include_str!("../../../../policy/cbc-junior-secondary.json");

/// Available predefined policies.
pub const PRESETS: &[&str] = &["cbc"];

/// Load a predefined policy by name.
pub fn load_preset(name: &str) -> Result<PolicyDef, StaffingError> {
    match name {
        "cbc" => {
            let policy: PolicyDef = serde_json::from_str(CBC_JUNIOR_SECONDARY_JSON)?;
            validate_policy(&policy)?;
            Ok(policy)
        }
        _ => Err(StaffingError::PolicyInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}
