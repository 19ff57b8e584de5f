//! Per-student record views: progress, eligibility, suggestions, performance

use super::{emit, fmt_average, open_store, CommandResult};
use acad_track::config::Config;
use acad_track::core::grading::AttendanceStats;
use acad_track::core::models::Catalog;
use acad_track::core::performance::PerformanceReport;
use acad_track::core::planner::NextTermSuggestion;
use acad_track::core::progress::{CreditSplit, ProgressReport};
use acad_track::core::service;
use acad_track::warn;

fn print_split(label: &str, split: &CreditSplit) {
    println!(
        "  {label:<10} {:>4} / {:<4} (remaining {})",
        split.earned, split.required, split.remaining
    );
}

/// `progress <STUDENT_ID>`
pub fn progress(config: &Config, student_id: &str, json: bool) -> CommandResult {
    let store = open_store(config)?;
    let report = service::student_progress(&store.records, student_id)?;
    emit(json, &report, |r: &ProgressReport| {
        println!("\n=== Progress: {} ({}) ===\n", r.name, r.student_id);
        println!("Major: {}", r.major);
        print_split("Total", &r.total);
        print_split("Mandatory", &r.mandatory);
        print_split("Elective", &r.elective);
        println!("\nCompletion: {:.1}%", r.completion_percentage);
        println!("GPA: {:.2}", r.gpa);
    })
}

/// `available <STUDENT_ID>`
pub fn available(config: &Config, student_id: &str, json: bool) -> CommandResult {
    let store = open_store(config)?;
    let courses = service::available_courses(&store.records, student_id)?;
    emit(json, &courses, |courses| {
        if courses.is_empty() {
            println!("No courses available for {student_id}");
            return;
        }
        println!("\n=== Available courses for {student_id} ===\n");
        for course in courses {
            let kind = if course.mandatory { "mandatory" } else { "elective" };
            println!(
                "  {:<10} {:<40} {:>2} cr  {kind}",
                course.code, course.name, course.credits
            );
        }
    })
}

/// `suggest <STUDENT_ID>`
pub fn suggest(config: &Config, student_id: &str, json: bool) -> CommandResult {
    let store = open_store(config)?;
    let suggestion = service::next_term_suggestion(&store.records, student_id)?;
    emit(json, &suggestion, |s: &NextTermSuggestion| {
        println!("\n=== Next term suggestion for {student_id} ===\n");
        for course in &s.courses {
            println!(
                "  {:<10} {:<40} {:>2} cr  unblocks {}",
                course.code, course.name, course.credits, course.dependents
            );
        }
        println!(
            "\nTotal: {} credits (allowed {}-{})",
            s.total_credits, s.min_credits, s.max_credits
        );
        if s.total_credits < s.min_credits {
            warn!("Suggestion for {student_id} is below the minimum load");
        }
    })
}

/// `performance <STUDENT_ID>`
pub fn performance(config: &Config, student_id: &str, json: bool) -> CommandResult {
    let store = open_store(config)?;
    let report = service::performance_report(&store.records, student_id)?;
    emit(json, &report, |r: &PerformanceReport| {
        println!("\n=== Performance: {} ({}) ===\n", r.name, r.student_id);
        println!("Overall GPA: {:.2}", r.overall_gpa);
        println!(
            "Credits: {} completed, {} failed, {} attempted",
            r.credits_completed, r.credits_failed, r.credits_attempted
        );

        for term in &r.terms {
            println!("\n{} - GPA {:.2} ({} credits)", term.term, term.gpa, term.credits);
            for course in &term.courses {
                println!(
                    "  {:<10} {:<40} {:>6}  {}",
                    course.course_code,
                    course.course_name,
                    fmt_average(course.average),
                    course.status
                );
            }
        }

        if !r.best_courses.is_empty() {
            println!("\nBest courses:");
            for course in &r.best_courses {
                println!("  {:<10} {}", course.course_code, fmt_average(course.average));
            }
        }
        if !r.failed_courses.is_empty() {
            println!("\nFailed courses ({}):", r.courses_failed);
            for course in &r.failed_courses {
                println!("  {:<10} {}", course.course_code, fmt_average(course.average));
            }
        }
    })
}

/// `attendance <STUDENT_ID> [--course CODE]`
pub fn attendance(
    config: &Config,
    student_id: &str,
    course: Option<&str>,
    json: bool,
) -> CommandResult {
    let store = open_store(config)?;
    let stats = service::attendance_stats(&store.records, student_id, course)?;
    emit(json, &stats, |s: &AttendanceStats| {
        let scope = course.unwrap_or("all courses");
        println!("\n=== Attendance: {student_id}, {scope} ===\n");
        println!("  Sessions: {}", s.total_sessions);
        println!("  Present:  {}", s.present);
        println!("  Late:     {}", s.late);
        println!("  Absent:   {}", s.absent);
        println!("  Rate:     {:.1}%", s.rate());
    })
}

/// `validate`
///
/// Loading already rejects invalid records; this reports the prerequisite
/// references that point outside the catalog.
pub fn validate(config: &Config) -> CommandResult {
    let store = open_store(config)?;
    let records = &store.records;
    let catalog: Catalog = records.courses.iter().cloned().collect();

    println!(
        "✓ {} student(s), {} course(s), {} grade(s), {} attendance record(s)",
        records.students.len(),
        records.courses.len(),
        records.grades.len(),
        records.attendance.len()
    );

    match catalog.validate_prerequisites() {
        Ok(()) => {
            println!("✓ All prerequisites resolve");
            Ok(())
        }
        Err(problems) => {
            for problem in &problems {
                println!("  ⚠️ {problem}");
            }
            Err(format!("{} unresolved prerequisite reference(s)", problems.len()).into())
        }
    }
}
