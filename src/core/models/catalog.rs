//! Course catalog

use super::{Course, PrerequisiteGraph};
use std::collections::HashMap;

/// Ordered collection of courses indexed by course code
///
/// Insertion order is preserved; it is the final tie-break wherever the
/// scheduler sorts courses with equal priority.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<Course>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from courses; later duplicates of a code are dropped
    #[must_use]
    pub fn from_courses(courses: impl IntoIterator<Item = Course>) -> Self {
        let mut catalog = Self::new();
        for course in courses {
            catalog.add_course(course);
        }
        catalog
    }

    /// Add a course
    ///
    /// # Returns
    /// `true` if the course was added, `false` if its code already exists
    pub fn add_course(&mut self, course: Course) -> bool {
        if self.index.contains_key(&course.code) {
            return false;
        }
        self.index.insert(course.code.clone(), self.courses.len());
        self.courses.push(course);
        true
    }

    /// Get a course by code
    #[must_use]
    pub fn get_course(&self, code: &str) -> Option<&Course> {
        self.index.get(code).map(|&idx| &self.courses[idx])
    }

    /// Iterate over courses in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Course> {
        self.courses.iter()
    }

    /// Number of courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Validate that every prerequisite refers to a course in the catalog
    ///
    /// # Errors
    /// Returns `Err` with one message per unknown prerequisite reference
    pub fn validate_prerequisites(&self) -> Result<(), Vec<String>> {
        let invalid: Vec<String> = self
            .iter()
            .flat_map(|course| {
                course
                    .prerequisites
                    .iter()
                    .filter(|p| !self.index.contains_key(p.as_str()))
                    .map(move |p| format!("Course '{}': prerequisite '{p}' not found", course.code))
            })
            .collect();

        if invalid.is_empty() {
            Ok(())
        } else {
            Err(invalid)
        }
    }

    /// Build the prerequisite graph of this catalog
    ///
    /// Edges to prerequisites outside the catalog are skipped.
    #[must_use]
    pub fn build_graph(&self) -> PrerequisiteGraph {
        let mut graph = PrerequisiteGraph::new();

        for course in &self.courses {
            for prereq in &course.prerequisites {
                if self.index.contains_key(prereq) {
                    graph.add_prerequisite(&course.code, prereq);
                }
            }
        }

        graph
    }
}

impl FromIterator<Course> for Catalog {
    fn from_iter<I: IntoIterator<Item = Course>>(iter: I) -> Self {
        Self::from_courses(iter)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Course;
    type IntoIter = std::slice::Iter<'a, Course>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
