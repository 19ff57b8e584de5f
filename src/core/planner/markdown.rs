//! Markdown rendering of a study roadmap

use super::roadmap::{GradedCourse, Roadmap};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const ROADMAP_TEMPLATE: &str = include_str!("../templates/roadmap.md");

/// Markdown roadmap reporter
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// File name used for a student's report
    ///
    /// Characters other than ASCII alphanumerics, `-` and `_` in the student
    /// id become `_`, so the name never leaves the reports directory.
    #[must_use]
    pub fn file_name(roadmap: &Roadmap) -> String {
        let id: String = roadmap
            .student
            .student_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("roadmap-{id}.md")
    }

    /// Render the report using template substitution
    ///
    /// The template is scanned once; substituted values are never scanned
    /// again, so record text containing `{{...}}` is written as is.
    #[must_use]
    pub fn render(&self, roadmap: &Roadmap) -> String {
        let mut output = String::with_capacity(ROADMAP_TEMPLATE.len());
        let mut rest = ROADMAP_TEMPLATE;

        while let Some(open) = rest.find("{{") {
            output.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            let Some(close) = after.find("}}") else {
                rest = &rest[open..];
                break;
            };
            let key = &after[..close];
            match Self::placeholder(roadmap, key) {
                Some(value) => output.push_str(&value),
                None => {
                    output.push_str("{{");
                    output.push_str(key);
                    output.push_str("}}");
                }
            }
            rest = &after[close + 2..];
        }
        output.push_str(rest);

        output
    }

    fn placeholder(roadmap: &Roadmap, key: &str) -> Option<String> {
        let student = &roadmap.student;
        let value = match key {
            "name" => student.name.clone(),
            "student_id" => student.student_id.clone(),
            "major" => student.major.clone(),
            "class_name" => student.class_name.clone().unwrap_or_else(|| "-".to_string()),
            "entry_year" => student.entry_year.to_string(),
            "completed_count" => roadmap.completed.len().to_string(),
            "in_progress_count" => roadmap.in_progress.len().to_string(),
            "remaining_count" => roadmap.remaining.len().to_string(),
            "planned_credits" => roadmap.planned_credits().to_string(),
            "term_count" => roadmap.path.len().to_string(),
            "completed" => Self::graded_table(&roadmap.completed),
            "in_progress" => Self::graded_table(&roadmap.in_progress),
            "path" => Self::path_table(roadmap),
            _ => return None,
        };
        Some(value)
    }

    /// Render and write the report
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn generate(&self, roadmap: &Roadmap, output_path: &Path) -> Result<(), Box<dyn Error>> {
        fs::write(output_path, self.render(roadmap))?;
        Ok(())
    }

    fn graded_table(courses: &[GradedCourse]) -> String {
        if courses.is_empty() {
            return "_None_\n".to_string();
        }

        let mut table = String::new();
        table.push_str("| Course | Name | Credits | Term | Average | Status |\n");
        table.push_str("|---|---|---|---|---|---|\n");
        for course in courses {
            let average = course
                .average
                .map_or_else(|| "-".to_string(), |avg| format!("{avg:.2}"));
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} | {average} | {} |",
                course.code, course.name, course.credits, course.term, course.status
            );
        }
        table
    }

    fn path_table(roadmap: &Roadmap) -> String {
        if roadmap.path.is_empty() {
            return "_Nothing left to schedule_\n".to_string();
        }

        let mut table = String::new();
        table.push_str("| Term | Courses | Credits |\n");
        table.push_str("|---|---|---|\n");
        for planned in &roadmap.path {
            let courses: Vec<String> = planned
                .courses
                .iter()
                .map(|c| {
                    let marker = if c.prerequisites_met { "" } else { " ⚠️" };
                    format!("{} - {}{marker}", c.code, c.name)
                })
                .collect();
            let _ = writeln!(
                table,
                "| {} | {} | {} |",
                planned.term,
                courses.join(", "),
                planned.total_credits
            );
        }
        table
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}
