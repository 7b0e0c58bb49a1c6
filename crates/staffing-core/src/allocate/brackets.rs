use crate::policy::schema::PolicyDef;

/// Total establishment mandated for an enrollment.
///
/// Enrollment inside a bracket (or in a gap below one) takes that bracket's
/// establishment. Past the table, every further stream of
/// `enrollment_per_stream` learners adds `teachers_per_stream`.
pub fn policy_total(policy: &PolicyDef, enrollment: u32) -> u32 {
    if let Some(bracket) = policy
        .brackets
        .iter()
        .find(|b| enrollment <= b.enrollment_max)
    {
        return bracket.establishment;
    }

    let Some(last) = policy.brackets.last() else {
        return 0;
    };
    let streams = enrollment.div_ceil(policy.enrollment_per_stream);
    let extra = streams.saturating_sub(last.streams);
    last.establishment
        .saturating_add(policy.teachers_per_stream.saturating_mul(extra))
}

/// Stream count a school of `staff_count` teachers is staffed for.
///
/// Inverse of the bracket table: the first bracket whose establishment
/// covers the total. Past the table, one stream per `teachers_per_stream`
/// extra teachers (rounded up).
pub fn likely_streams(policy: &PolicyDef, staff_count: u32) -> u32 {
    if let Some(bracket) = policy
        .brackets
        .iter()
        .find(|b| b.establishment >= staff_count)
    {
        return bracket.streams;
    }

    let Some(last) = policy.brackets.last() else {
        return 0;
    };
    let excess = staff_count.saturating_sub(last.establishment);
    excess
        .div_ceil(policy.teachers_per_stream)
        .saturating_add(last.streams)
}
