use staffing_core::error::StaffingError;
use staffing_core::AssessmentResult;

pub fn print(result: &AssessmentResult) -> Result<(), StaffingError> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}
