use staffing_core::dataset::load_dataset;
use staffing_core::error::StaffingError;
use staffing_core::policy::builtin;
use staffing_core::{AllocationStrategy, AssessmentResult, EngineOptions, StaffingEngine};
use std::path::PathBuf;

use crate::output;

pub struct EvaluateArgs {
    pub dataset: PathBuf,
    pub school: Option<String>,
    pub policy: Option<PathBuf>,
    pub preset: String,
    pub strategy: AllocationStrategy,
    pub include_minor: bool,
    pub clamp_negative: bool,
    pub output_format: String,
    pub verbose: bool,
}

pub fn run(args: EvaluateArgs) -> Result<(), StaffingError> {
    let policy = match &args.policy {
        Some(path) => staffing_core::policy::load_policy(path)?,
        None => builtin::load_preset(&args.preset)?,
    };

    let options = EngineOptions {
        strategy: args.strategy,
        include_minor: args.include_minor,
        clamp_negative: args.clamp_negative,
    };
    log::debug!(
        "policy '{}' v{}, strategy {}, minor {}, clamp {}",
        policy.name,
        policy.version,
        options.strategy,
        options.include_minor,
        options.clamp_negative
    );
    let engine = StaffingEngine::new(policy, options)?;
    let dataset = load_dataset(&args.dataset)?;

    let result = match &args.school {
        Some(name) => AssessmentResult {
            records: vec![engine.evaluate_institution(&dataset, name)?],
            diagnostics: dataset.diagnostics,
        },
        None => AssessmentResult {
            records: engine.evaluate_all(&dataset.records),
            diagnostics: dataset.diagnostics,
        },
    };

    match args.output_format.as_str() {
        "json" => output::json::print(&result)?,
        _ => output::table::print(&result, engine.options(), args.verbose),
    }

    Ok(())
}
