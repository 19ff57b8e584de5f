//! Data models for academic records

pub mod attendance;
pub mod catalog;
pub mod course;
pub mod curriculum;
pub mod grade;
pub mod graph;
pub mod student;
pub mod term;

pub use attendance::{Attendance, AttendanceStatus};
pub use catalog::Catalog;
pub use course::Course;
pub use curriculum::Curriculum;
pub use grade::{Grade, GradeStatus};
pub use graph::PrerequisiteGraph;
pub use student::Student;
pub use term::Term;
