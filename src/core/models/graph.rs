//! Reverse prerequisite graph

use std::collections::HashMap;

/// Maps each course to the courses that directly require it
///
/// Cycles are not rejected. Nothing in the scheduler walks the graph
/// transitively, so a cyclic catalog only makes the affected courses
/// permanently unavailable.
#[derive(Debug, Clone, Default)]
pub struct PrerequisiteGraph {
    dependents: HashMap<String, Vec<String>>,
}

impl PrerequisiteGraph {
    /// Create a new empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a prerequisite edge `prerequisite -> course`; duplicate edges are ignored
    pub fn add_prerequisite(&mut self, course: &str, prerequisite: &str) {
        let deps = self.dependents.entry(prerequisite.to_string()).or_default();
        if !deps.iter().any(|d| d == course) {
            deps.push(course.to_string());
        }
    }

    /// Number of courses that directly require the given course (0 if unknown)
    #[must_use]
    pub fn dependent_count(&self, code: &str) -> usize {
        self.dependents.get(code).map_or(0, Vec::len)
    }
}
