use staffing_core::dataset::load_dataset;
use staffing_core::error::StaffingError;
use std::path::Path;

pub fn run(dataset_path: &Path) -> Result<(), StaffingError> {
    let dataset = load_dataset(dataset_path)?;

    for name in dataset.institution_names() {
        println!("{name}");
    }

    if !dataset.diagnostics.is_empty() {
        eprintln!("{} row(s) skipped while loading:", dataset.diagnostics.len());
        for d in &dataset.diagnostics {
            eprintln!("  line {}: {}", d.line, d.reason);
        }
    }

    Ok(())
}
