pub mod aggregate;
pub mod engine;
pub mod outcome;
pub mod shortage;

pub use engine::{EngineOptions, StaffingEngine};
pub use outcome::{AssessmentResult, OutputRecord};
pub use shortage::ShortageReport;
