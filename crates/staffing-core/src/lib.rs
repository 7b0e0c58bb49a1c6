pub mod allocate;
pub mod assess;
pub mod dataset;
pub mod error;
pub mod model;
pub mod normalize;
pub mod policy;

use std::path::Path;

pub use allocate::AllocationStrategy;
pub use assess::{AssessmentResult, EngineOptions, OutputRecord, StaffingEngine};
use error::StaffingError;
use policy::schema::PolicyDef;

/// Main API entry point: load a dataset file and assess every institution in it.
///
/// Rows are grouped per institution, normalized and assessed independently;
/// rows that cannot be read are reported in `diagnostics` instead of
/// aborting the load.
pub fn assess_file(
    path: &Path,
    policy: PolicyDef,
    options: EngineOptions,
) -> Result<AssessmentResult, StaffingError> {
    let engine = StaffingEngine::new(policy, options)?;
    let dataset = dataset::load_dataset(path)?;

    Ok(AssessmentResult {
        records: engine.evaluate_all(&dataset.records),
        diagnostics: dataset.diagnostics,
    })
}

/// Assess a single institution of a dataset file.
pub fn assess_institution(
    path: &Path,
    name: &str,
    policy: PolicyDef,
    options: EngineOptions,
) -> Result<OutputRecord, StaffingError> {
    let engine = StaffingEngine::new(policy, options)?;
    let dataset = dataset::load_dataset(path)?;
    engine.evaluate_institution(&dataset, name)
}
