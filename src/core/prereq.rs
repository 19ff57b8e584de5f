//! Prerequisite eligibility

use crate::core::grading::{passed_courses, ScoredGrade};
use crate::core::models::{Catalog, Course};
use std::collections::HashSet;

/// Whether every direct prerequisite of `course` is in `passed`
#[must_use]
pub fn prerequisites_met(course: &Course, passed: &HashSet<String>) -> bool {
    course.prerequisites.iter().all(|p| passed.contains(p))
}

/// Courses of `catalog` the student may take now
///
/// A course is available when it has not been passed and every direct
/// prerequisite has been passed. Prerequisites of prerequisites are not
/// checked. Catalog order is preserved.
#[must_use]
pub fn available_courses<'a>(grades: &[ScoredGrade], catalog: &'a Catalog) -> Vec<&'a Course> {
    let passed = passed_courses(grades);
    catalog
        .iter()
        .filter(|course| !passed.contains(&course.code) && prerequisites_met(course, &passed))
        .collect()
}
