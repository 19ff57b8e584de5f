//! In-memory record and alert store backed by a JSON dataset

use crate::core::error::{CoreError, Result};
use crate::core::models::{Attendance, Catalog, Course, Curriculum, Grade, Student, Term};
use crate::core::risk::RiskAlert;
use crate::core::store::{AlertFilter, AlertStore, RecordStore};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Academic records held in memory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSnapshot {
    /// Students
    #[serde(default)]
    pub students: Vec<Student>,
    /// Course catalog of every program, in catalog order
    #[serde(default)]
    pub courses: Vec<Course>,
    /// One curriculum per program
    #[serde(default)]
    pub curricula: Vec<Curriculum>,
    /// Grade records
    #[serde(default)]
    pub grades: Vec<Grade>,
    /// Attendance records
    #[serde(default)]
    pub attendance: Vec<Attendance>,
}

impl RecordSnapshot {
    /// Check every record and the uniqueness of business keys
    ///
    /// Unknown prerequisite codes are only logged; the scheduler tolerates them.
    ///
    /// # Errors
    /// Returns the first `InvalidInput` found.
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for student in &self.students {
            student.validate()?;
            if !ids.insert(student.student_id.as_str()) {
                return Err(CoreError::invalid(
                    "student_id",
                    format!("duplicate student '{}'", student.student_id),
                ));
            }
        }

        let mut codes = HashSet::new();
        for course in &self.courses {
            course.validate()?;
            if !codes.insert(course.code.as_str()) {
                return Err(CoreError::invalid(
                    "code",
                    format!("duplicate course '{}'", course.code),
                ));
            }
        }

        for curriculum in &self.curricula {
            curriculum.validate()?;
        }
        for grade in &self.grades {
            grade.validate()?;
        }
        for record in &self.attendance {
            record.term.validate()?;
        }

        if let Err(problems) = Catalog::from_courses(self.courses.iter().cloned()).validate_prerequisites()
        {
            for problem in problems {
                crate::warn!("{problem}");
            }
        }

        Ok(())
    }
}

impl RecordStore for RecordSnapshot {
    fn student(&self, student_id: &str) -> Result<Option<Student>> {
        Ok(self
            .students
            .iter()
            .find(|s| s.student_id == student_id)
            .cloned())
    }

    fn students(&self) -> Result<Vec<Student>> {
        Ok(self.students.clone())
    }

    fn grades_for(&self, student_id: &str) -> Result<Vec<Grade>> {
        Ok(self
            .grades
            .iter()
            .filter(|g| g.student_id == student_id)
            .cloned()
            .collect())
    }

    fn attendance_for(&self, student_id: &str) -> Result<Vec<Attendance>> {
        Ok(self
            .attendance
            .iter()
            .filter(|a| a.student_id == student_id)
            .cloned()
            .collect())
    }

    fn course(&self, code: &str) -> Result<Option<Course>> {
        Ok(self.courses.iter().find(|c| c.code == code).cloned())
    }

    fn courses_for_major(&self, major: &str) -> Result<Catalog> {
        Ok(self
            .courses
            .iter()
            .filter(|c| c.major == major)
            .cloned()
            .collect())
    }

    fn curriculum(&self, major: &str) -> Result<Option<Curriculum>> {
        Ok(self.curricula.iter().find(|c| c.major == major).cloned())
    }
}

/// Risk alerts in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertLog {
    alerts: Vec<RiskAlert>,
}

impl AlertLog {
    /// Number of stored alerts
    #[must_use]
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    /// Whether the log is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// Check the term of every stored alert
    ///
    /// # Errors
    /// Returns the first `InvalidInput` found.
    pub fn validate(&self) -> Result<()> {
        self.alerts.iter().try_for_each(|a| a.term().validate())
    }
}

impl AlertStore for AlertLog {
    fn insert_alert(&mut self, alert: RiskAlert) -> Result<()> {
        self.alerts.push(alert);
        Ok(())
    }

    fn replace_term_alerts(&mut self, term: Term, alerts: Vec<RiskAlert>) -> Result<()> {
        if let Some(stray) = alerts.iter().find(|a| a.term() != term) {
            return Err(CoreError::Storage(format!(
                "alert for {} belongs to {}, not {term}",
                stray.student_id(),
                stray.term()
            )));
        }
        self.alerts.retain(|a| a.term() != term);
        self.alerts.extend(alerts);
        Ok(())
    }

    fn latest_alert(&self, student_id: &str) -> Result<Option<RiskAlert>> {
        // max_by_key keeps the last of equal keys, i.e. the latest insertion
        Ok(self
            .alerts
            .iter()
            .filter(|a| a.student_id() == student_id)
            .max_by_key(|a| a.term())
            .cloned())
    }

    fn list_alerts(&self, filter: AlertFilter) -> Result<Vec<RiskAlert>> {
        let mut alerts: Vec<RiskAlert> = self
            .alerts
            .iter()
            .filter(|a| filter.matches(a.term()))
            .cloned()
            .collect();
        alerts.sort_by(|a, b| b.score().partial_cmp(&a.score()).unwrap_or(Ordering::Equal));
        Ok(alerts)
    }
}

/// Records plus alert log, persisted together as one JSON document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    /// Academic records
    #[serde(flatten)]
    pub records: RecordSnapshot,
    /// Generated alerts
    #[serde(default)]
    pub alerts: AlertLog,
}

impl MemoryStore {
    /// Wrap records with an empty alert log
    #[must_use]
    pub fn new(records: RecordSnapshot) -> Self {
        Self {
            records,
            alerts: AlertLog::default(),
        }
    }

    /// Parse and validate a JSON dataset
    ///
    /// Stored alerts must carry a valid term as well.
    ///
    /// # Errors
    /// Returns `Storage` for malformed JSON, or the validation error.
    pub fn from_json(json: &str) -> Result<Self> {
        let store: Self = serde_json::from_str(json)
            .map_err(|e| CoreError::Storage(format!("malformed dataset: {e}")))?;
        store.records.validate()?;
        store.alerts.validate()?;
        Ok(store)
    }

    /// Load a JSON dataset from disk
    ///
    /// # Errors
    /// Returns `Storage` if the file cannot be read or parsed, or the
    /// validation error.
    pub fn load_json(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| CoreError::Storage(format!("cannot read {}: {e}", path.display())))?;
        let store = Self::from_json(&json)?;
        crate::debug!(
            "Loaded {} student(s), {} course(s) and {} alert(s) from {}",
            store.records.students.len(),
            store.records.courses.len(),
            store.alerts.len(),
            path.display()
        );
        Ok(store)
    }

    /// Write the dataset, alerts included, to disk
    ///
    /// The document is written to a temporary file in the target directory
    /// and renamed over `path`, so an interrupted save leaves the previous
    /// file intact.
    ///
    /// # Errors
    /// Returns `Storage` if encoding, writing or the final rename fails.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Storage(format!("cannot encode dataset: {e}")))?;
        let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(|e| {
                    CoreError::Storage(format!("cannot create {}: {e}", parent.display()))
                })?;
                parent
            }
            None => Path::new("."),
        };

        let write_err =
            |e: std::io::Error| CoreError::Storage(format!("cannot write {}: {e}", path.display()));
        let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
        file.write_all(json.as_bytes()).map_err(write_err)?;
        file.as_file().sync_all().map_err(write_err)?;
        file.persist(path).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    /// Borrow records and alerts separately
    pub fn split(&mut self) -> (&RecordSnapshot, &mut AlertLog) {
        (&self.records, &mut self.alerts)
    }
}
