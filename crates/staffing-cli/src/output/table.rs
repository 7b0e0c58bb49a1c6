use staffing_core::{AssessmentResult, EngineOptions, OutputRecord};

pub fn print(result: &AssessmentResult, options: &EngineOptions, verbose: bool) {
    for (i, record) in result.records.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_record(record, options, verbose);
    }

    if !result.diagnostics.is_empty() {
        println!();
        println!("Skipped rows:");
        for d in &result.diagnostics {
            println!("  line {}: {}", d.line, d.reason);
        }
    }
}

fn print_record(record: &OutputRecord, options: &EngineOptions, verbose: bool) {
    println!("=== {} ===\n", record.institution_name);

    println!("  TOD:                 {}", record.district_code);
    println!("  Enrollment:          {}", record.enrollment);
    println!("  Classes:             {}", record.classes);
    match record.likely_streams {
        Some(streams) => println!("  Likely streams:      {streams}"),
        None => println!("  Streams:             {}", record.streams),
    }
    println!("  Policy CBE:          {}", record.policy_total.round_dp(2));
    println!("  Recorded teachers:   {}", record.staff_count);
    println!("  Catalog specialists: {}", record.actual_total());
    println!(
        "  Administration:      {} deputy principal(s), {} senior master(s)",
        record.administration.deputy_principals, record.administration.senior_masters
    );
    println!();
    println!("  Recommendation: {}\n", record.recommendation);

    let rows = record.subject_rows();
    let width = rows
        .iter()
        .map(|r| r.subject.len())
        .max()
        .unwrap_or(10)
        .max("Subject".len());

    println!(
        "  {:<width$}  {:>8}  {:>8}  {:>8}",
        "Subject",
        "Actual",
        "Required",
        "Shortage",
        width = width
    );
    println!("  {}", "-".repeat(width + 30));
    for row in &rows {
        let marker = if row.shortage.is_sign_positive() && !row.shortage.is_zero() {
            " *"
        } else {
            ""
        };
        println!(
            "  {:<width$}  {:>8}  {:>8}  {:>8}{}",
            row.subject,
            row.actual,
            row.required.to_string(),
            row.shortage.to_string(),
            marker,
            width = width
        );
    }
    println!();

    if verbose {
        println!(
            "  Strategy: {}, minor specializations {}, shortages {}",
            options.strategy,
            if options.include_minor {
                "counted"
            } else {
                "ignored"
            },
            if options.clamp_negative {
                "clamped at zero"
            } else {
                "signed"
            }
        );
        if !record.unmapped_labels.is_empty() {
            println!(
                "  Unrecognized specializations: {}",
                record.unmapped_labels.join(", ")
            );
        }
        println!();
    }
}
