//! Roadmap classification, term packing and Markdown output

use acad_track::core::grading::score_grades;
use acad_track::core::memory::RecordSnapshot;
use acad_track::core::models::{Catalog, Course, Curriculum, Grade, GradeStatus, Student, Term};
use acad_track::core::planner::{build_roadmap, MarkdownReporter, ROADMAP_TERM_CREDIT_CAP};
use acad_track::core::service;
use std::fs;
use tempfile::TempDir;

fn records() -> RecordSnapshot {
    let first = Term::first_of(2022);
    let second = Term::new(2, 2022).unwrap();
    RecordSnapshot {
        students: vec![
            Student::new("S1".into(), "Avery".into(), "Math".into(), 2022).with_class("M22"),
        ],
        courses: vec![
            Course::new("M1", "Analysis I", 4, "Math").unwrap().recommended_in(1),
            Course::new("M2", "Analysis II", 4, "Math").unwrap().requires("M1"),
            Course::new("M3", "Measure Theory", 6, "Math").unwrap().requires("M2"),
            Course::new("E1", "History of Mathematics", 3, "Math").unwrap().elective(),
            Course::new("M4", "Linear Algebra", 8, "Math").unwrap(),
            Course::new("M5", "Probability", 5, "Math").unwrap(),
        ],
        curricula: vec![Curriculum::new("Math", 30, 27, 3).unwrap()],
        grades: vec![
            Grade::new("S1", "M1", Some(3.0), Some(3.0), first).unwrap(),
            Grade::new("S1", "M1", Some(8.0), Some(8.0), second).unwrap(),
            Grade::new("S1", "M4", Some(2.0), Some(4.0), second).unwrap(),
            Grade::new("S1", "E1", Some(7.0), None, Term::first_of(2023)).unwrap(),
        ],
        attendance: Vec::new(),
    }
}

#[test]
fn test_retake_pass_completes_course() {
    let roadmap = service::study_roadmap(&records(), "S1").unwrap();

    assert_eq!(roadmap.completed.len(), 1);
    let m1 = &roadmap.completed[0];
    assert_eq!(m1.code, "M1");
    assert_eq!(m1.term, Term::new(2, 2022).unwrap());
    assert!((m1.average.unwrap() - 8.2).abs() < 1e-9);
}

#[test]
fn test_failed_and_ungraded_are_in_progress() {
    let roadmap = service::study_roadmap(&records(), "S1").unwrap();

    let in_progress: Vec<(&str, GradeStatus)> = roadmap
        .in_progress
        .iter()
        .map(|c| (c.code.as_str(), c.status))
        .collect();
    assert_eq!(
        in_progress,
        vec![("E1", GradeStatus::Ungraded), ("M4", GradeStatus::Fail)]
    );
}

#[test]
fn test_remaining_courses_packed_from_entry_year() {
    let roadmap = service::study_roadmap(&records(), "S1").unwrap();

    let remaining: Vec<(&str, bool)> = roadmap
        .remaining
        .iter()
        .map(|c| (c.code.as_str(), c.prerequisites_met))
        .collect();
    assert_eq!(remaining, vec![("M2", true), ("M3", false), ("M5", true)]);

    assert_eq!(roadmap.path.len(), 1);
    let planned = &roadmap.path[0];
    assert_eq!(planned.term, Term::first_of(2022));
    let order: Vec<&str> = planned.courses.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(order, vec!["M5", "M2", "M3"]);
    assert_eq!(planned.total_credits, 15);
    assert_eq!(roadmap.term_of("M3"), Some(Term::first_of(2022)));
    assert_eq!(roadmap.term_of("M1"), None);
}

#[test]
fn test_cyclic_prerequisites_still_scheduled() {
    let student = Student::new("S2".into(), "Blake".into(), "Math".into(), 2024);
    let catalog = Catalog::from_courses(vec![
        Course::new("C1", "Cycle One", 12, "Math").unwrap().requires("C2"),
        Course::new("C2", "Cycle Two", 12, "Math").unwrap().requires("C1"),
    ]);

    let roadmap = build_roadmap(&student, &catalog, &[]);

    assert!(roadmap.remaining.iter().all(|c| !c.prerequisites_met));
    assert_eq!(roadmap.path.len(), 2);
    assert_eq!(roadmap.path[1].term, Term::new(2, 2024).unwrap());
    assert!(roadmap
        .path
        .iter()
        .all(|t| t.total_credits <= ROADMAP_TERM_CREDIT_CAP));
}

#[test]
fn test_roadmap_uses_scored_grades_from_catalog() {
    let records = records();
    let catalog: Catalog = records.courses.iter().cloned().collect();
    let scored = score_grades(&records.grades, &catalog, &records.attendance);
    let direct = build_roadmap(&records.students[0], &catalog, &scored);

    assert_eq!(direct, service::study_roadmap(&records, "S1").unwrap());
}

#[test]
fn test_markdown_report_written() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let roadmap = service::study_roadmap(&records(), "S1").unwrap();

    let path = dir.path().join(MarkdownReporter::file_name(&roadmap));
    MarkdownReporter::new()
        .generate(&roadmap, &path)
        .expect("report should be written");

    assert!(path.ends_with("roadmap-S1.md"));
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# Study Roadmap: Avery"));
    assert!(content.contains("| Class | M22 |"));
    assert!(content.contains("Semester 1 - 2022"));
    assert!(content.contains("Measure Theory"));
    assert!(!content.contains("{{"));
}
