use crate::model::AdminEstablishment;
use crate::policy::schema::PolicyDef;

/// Deputy principals and senior masters for a school with `classes` classes.
///
/// Class counts beyond the last row take the last row.
pub fn administration(policy: &PolicyDef, classes: u32) -> AdminEstablishment {
    policy
        .admin_brackets
        .iter()
        .find(|row| classes <= row.max_classes)
        .or_else(|| policy.admin_brackets.last())
        .map(|row| AdminEstablishment {
            deputy_principals: row.deputy_principals,
            senior_masters: row.senior_masters,
        })
        .unwrap_or_default()
}
