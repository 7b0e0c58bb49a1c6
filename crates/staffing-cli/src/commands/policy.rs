use staffing_core::error::StaffingError;
use staffing_core::policy::builtin;
use staffing_core::policy::schema::PolicyDef;
use std::collections::BTreeMap;
use std::path::Path;

pub fn list() -> Result<(), StaffingError> {
    println!("Available predefined policies:\n");
    for name in builtin::PRESETS {
        let policy = builtin::load_preset(name)?;
        println!("  {:<8} {} (v{})", name, policy.name, policy.version);
        if let Some(ref desc) = policy.description {
            println!("           {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), StaffingError> {
    let policy = builtin::load_preset(preset)?;
    print_policy(&policy);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), StaffingError> {
    let policy = staffing_core::policy::load_policy(file)?;

    println!("Policy '{}' (v{}) is valid.", policy.name, policy.version);
    println!("  Subjects: {}", policy.subjects.len());
    println!("  Labels: {}", policy.labels.len());
    println!("  Brackets: {}", policy.brackets.len());

    // Warnings, not errors
    let mut warnings = Vec::new();
    for subject in &policy.subjects {
        if subject.weekly_lessons == 0 {
            warnings.push(format!("subject '{}' has no weekly lessons", subject.name));
        }
        if !policy.labels.values().any(|s| *s == subject.name) {
            warnings.push(format!(
                "subject '{}' has no label aliases; only its exact name will match",
                subject.name
            ));
        }
    }
    for pair in policy.brackets.windows(2) {
        if pair[1].enrollment_min != pair[0].enrollment_max + 1 {
            warnings.push(format!(
                "gap between brackets {}-{} and {}-{}",
                pair[0].enrollment_min,
                pair[0].enrollment_max,
                pair[1].enrollment_min,
                pair[1].enrollment_max
            ));
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}

fn print_policy(policy: &PolicyDef) {
    println!("{} (version {})\n", policy.name, policy.version);

    if let Some(ref desc) = policy.description {
        println!("{}\n", desc);
    }

    println!(
        "Classes hold at most {} learners. A teacher covers {} periods a week.",
        policy.max_class_size, policy.periods_per_teacher
    );
    println!(
        "Each class is timetabled for {} lessons a week ({} subject + {} pastoral).\n",
        policy.weekly_lessons_per_class(),
        policy.subject_lessons_per_class(),
        policy.pastoral_lessons
    );

    let max_name_len = policy
        .subjects
        .iter()
        .map(|s| s.name.len())
        .max()
        .unwrap_or(20);

    println!("Subjects:");
    println!();
    println!(
        "  {:<width$}  {:>7}  {:>17}",
        "Subject",
        "Lessons",
        "Teachers/class",
        width = max_name_len
    );
    println!("  {}", "-".repeat(max_name_len + 28));
    for subject in &policy.subjects {
        let per_class = f64::from(subject.weekly_lessons) / f64::from(policy.periods_per_teacher);
        println!(
            "  {:<width$}  {:>7}  {:>17.3}",
            subject.name,
            subject.weekly_lessons,
            per_class,
            width = max_name_len
        );
    }
    println!();

    println!("Establishment brackets:");
    println!();
    println!("  {:>7}  {:>15}  {:>13}", "Streams", "Enrollment", "Establishment");
    for b in &policy.brackets {
        println!(
            "  {:>7}  {:>15}  {:>13}",
            b.streams,
            format!("{}-{}", b.enrollment_min, b.enrollment_max),
            b.establishment
        );
    }
    println!(
        "\nBeyond the table, each further {} learners add {} teachers.\n",
        policy.enrollment_per_stream, policy.teachers_per_stream
    );

    println!("Administration (by number of classes):");
    println!();
    let mut lower = 0;
    for row in &policy.admin_brackets {
        println!(
            "  {:>3}-{:<3}  {} deputy principal(s), {} senior master(s)",
            lower, row.max_classes, row.deputy_principals, row.senior_masters
        );
        lower = row.max_classes + 1;
    }
    println!();

    let mut by_subject: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (label, subject) in &policy.labels {
        by_subject.entry(subject).or_default().push(label);
    }
    println!("Recognized specialization labels:");
    println!();
    for subject in &policy.subjects {
        if let Some(labels) = by_subject.get(subject.name.as_str()) {
            println!("  {}: {}", subject.name, labels.join(", "));
        }
    }
    println!();
    println!("Labels not listed here are ignored when counting teachers.");
}
