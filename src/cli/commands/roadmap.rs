//! Roadmap command handler

use super::{emit, fmt_average, open_store, CommandResult};
use acad_track::config::Config;
use acad_track::core::planner::{MarkdownReporter, Roadmap};
use acad_track::core::service;
use std::fs;
use std::path::PathBuf;

fn print_roadmap(roadmap: &Roadmap) {
    let student = &roadmap.student;
    println!("\n=== Roadmap: {} ({}) ===\n", student.name, student.student_id);
    println!("Major: {}  Entry year: {}", student.major, student.entry_year);

    println!("\nCompleted ({}):", roadmap.completed.len());
    for course in &roadmap.completed {
        println!("  {:<10} {:<40} {}", course.code, course.name, fmt_average(course.average));
    }

    println!("\nIn progress ({}):", roadmap.in_progress.len());
    for course in &roadmap.in_progress {
        println!(
            "  {:<10} {:<40} {} ({})",
            course.code,
            course.name,
            fmt_average(course.average),
            course.status
        );
    }

    println!("\nRecommended path:");
    for planned in &roadmap.path {
        println!("  {} - {} credits", planned.term, planned.total_credits);
        for course in &planned.courses {
            let note = if course.prerequisites_met {
                String::new()
            } else {
                format!("  (needs {})", course.prerequisites.join(", "))
            };
            println!("    {:<10} {:<40} {:>2} cr{note}", course.code, course.name, course.credits);
        }
    }
}

/// `roadmap <STUDENT_ID> [--report]`
pub fn run(config: &Config, student_id: &str, report: bool, json: bool) -> CommandResult {
    let store = open_store(config)?;
    let roadmap = service::study_roadmap(&store.records, student_id)?;
    emit(json, &roadmap, print_roadmap)?;

    if report {
        let reports_dir = PathBuf::from(&config.paths.reports_dir);
        fs::create_dir_all(&reports_dir).map_err(|e| {
            format!("Failed to create reports directory {}: {e}", reports_dir.display())
        })?;
        let path = reports_dir.join(MarkdownReporter::file_name(&roadmap));
        MarkdownReporter::new().generate(&roadmap, &path)?;
        // Keep stdout parseable in JSON mode
        eprintln!("✓ Report generated: {}", path.display());
    }
    Ok(())
}
