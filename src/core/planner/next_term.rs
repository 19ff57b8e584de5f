//! Next-term course suggestion

use crate::core::models::{Course, Curriculum, PrerequisiteGraph};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Sort position of courses without a recommended term
pub const NO_RECOMMENDED_TERM: u32 = 999;

/// A course chosen for the next term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedCourse {
    /// Course code
    pub code: String,
    /// Course name
    pub name: String,
    /// Course credits
    pub credits: u32,
    /// Whether the course is mandatory
    pub mandatory: bool,
    /// Recommended term number, if any
    pub recommended_term: Option<u32>,
    /// Number of catalog courses that require this one
    pub dependents: usize,
}

/// Courses suggested for the next term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextTermSuggestion {
    /// Chosen courses in priority order
    pub courses: Vec<SuggestedCourse>,
    /// Sum of the chosen courses' credits
    pub total_credits: u32,
    /// Curriculum minimum credits per term
    pub min_credits: u32,
    /// Curriculum maximum credits per term
    pub max_credits: u32,
}

/// Order candidates by recommended term, then by how many courses they unblock
///
/// The sort is stable, so equal keys keep their catalog order.
fn prioritize<'a>(candidates: &mut Vec<(&'a Course, usize)>) {
    candidates.sort_by_key(|(course, dependents)| {
        (
            course.recommended_term.unwrap_or(NO_RECOMMENDED_TERM),
            Reverse(*dependents),
        )
    });
}

/// Suggest courses for the next term
///
/// Mandatory courses are taken first, each one added only if it keeps the
/// total within `max_credits_per_term`; a course that does not fit is skipped
/// and never revisited. If the total is still below `min_credits_per_term`,
/// electives are walked in the same order until the minimum is reached.
///
/// # Arguments
/// * `available` - Courses the student may take now
/// * `graph` - Prerequisite graph of the student's program, for dependent counts
/// * `curriculum` - Supplies the per-term credit bounds
#[must_use]
pub fn suggest_next_term(
    available: &[&Course],
    graph: &PrerequisiteGraph,
    curriculum: &Curriculum,
) -> NextTermSuggestion {
    let max = curriculum.max_credits_per_term;
    let min = curriculum.min_credits_per_term;

    let (mut mandatory, mut electives): (Vec<_>, Vec<_>) = available
        .iter()
        .map(|course| (*course, graph.dependent_count(&course.code)))
        .partition(|(course, _)| course.mandatory);
    prioritize(&mut mandatory);
    prioritize(&mut electives);

    let mut chosen = Vec::new();
    let mut total = 0_u32;

    for (course, dependents) in mandatory {
        if total.saturating_add(course.credits) <= max {
            total = total.saturating_add(course.credits);
            chosen.push((course, dependents));
        } else {
            crate::debug!(
                "Skipping {} ({} credits): would exceed {max}",
                course.code,
                course.credits
            );
        }
    }

    if total < min {
        for (course, dependents) in electives {
            if total.saturating_add(course.credits) <= max {
                total = total.saturating_add(course.credits);
                chosen.push((course, dependents));
            }
            if total >= min {
                break;
            }
        }
    }

    crate::debug!(
        "Suggested {} course(s), {total} credits (bounds {min}-{max})",
        chosen.len()
    );

    NextTermSuggestion {
        courses: chosen
            .into_iter()
            .map(|(course, dependents)| SuggestedCourse {
                code: course.code.clone(),
                name: course.name.clone(),
                credits: course.credits,
                mandatory: course.mandatory,
                recommended_term: course.recommended_term,
                dependents,
            })
            .collect(),
        total_credits: total,
        min_credits: min,
        max_credits: max,
    }
}
