//! Course scheduling: next-term suggestion and multi-term roadmap
//!
//! Both schedulers are greedy. Neither backtracks, and the roadmap does not
//! re-check prerequisites against the terms it has already planned.

pub mod markdown;
pub mod next_term;
pub mod roadmap;

pub use markdown::MarkdownReporter;
pub use next_term::{suggest_next_term, NextTermSuggestion, SuggestedCourse, NO_RECOMMENDED_TERM};
pub use roadmap::{
    build_roadmap, GradedCourse, PlannedTerm, RemainingCourse, Roadmap, StudentSummary,
    ROADMAP_TERM_CREDIT_CAP,
};
