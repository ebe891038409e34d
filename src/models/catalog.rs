//! Catalog records: teachers, subjects and class groups.
//!
//! These are maintained outside the engine; the candidate filter only reads them.

use serde::{Deserialize, Serialize};

use super::{ClassGroupId, ShiftId, SubjectId, TeacherId};

fn default_active() -> bool {
    true
}

/// A teacher who can be assigned to timetable entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique identifier for the teacher.
    pub id: TeacherId,
    /// The teacher's display name.
    pub name: String,
    /// The department the teacher belongs to.
    #[serde(default)]
    pub department: Option<String>,
    /// Whether the teacher is currently active.
    #[serde(default = "default_active")]
    pub active: bool,
}

/// A subject taught at the institution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique identifier for the subject.
    pub id: SubjectId,
    /// The subject's display name.
    pub name: String,
    /// Short code, e.g. "MAT".
    #[serde(default)]
    pub code: Option<String>,
    /// Nominal weekly lesson count.
    #[serde(default = "default_weekly_hours")]
    pub weekly_hours: u32,
    /// Whether the subject is currently offered.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_weekly_hours() -> u32 {
    1
}

/// A class group (e.g. "1°M01") attending one shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassGroup {
    /// Unique identifier for the class group.
    pub id: ClassGroupId,
    /// The group's display name.
    pub name: String,
    /// School year, e.g. "1°".
    #[serde(default)]
    pub year: Option<String>,
    /// The shift the group attends.
    pub shift_id: ShiftId,
    /// The course the group belongs to.
    #[serde(default)]
    pub course: Option<String>,
    /// Whether the group is currently active.
    #[serde(default = "default_active")]
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_defaults() {
        let subject: Subject = serde_json::from_str(r#"{"id": 7, "name": "Matemática"}"#).unwrap();
        assert_eq!(subject.weekly_hours, 1);
        assert!(subject.active);
        assert_eq!(subject.code, None);
    }

    #[test]
    fn test_class_group_requires_shift() {
        let result: Result<ClassGroup, _> = serde_json::from_str(r#"{"id": 3, "name": "1°M01"}"#);
        assert!(result.is_err());
    }
}
