//! Link records gating valid assignments.

use serde::{Deserialize, Serialize};

use super::{ClassGroupId, SubjectId, TeacherId};

fn default_weekly_hours() -> u32 {
    1
}

/// States that a teacher can teach a subject.
///
/// Unique per (teacher, subject) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeacherSubjectLink {
    /// The teacher.
    pub teacher_id: TeacherId,
    /// The subject the teacher can teach.
    pub subject_id: SubjectId,
    /// Weekly lessons the teacher gives in this subject.
    #[serde(default = "default_weekly_hours")]
    pub weekly_hours: u32,
}

impl TeacherSubjectLink {
    /// Creates a link with the default weekly load of one lesson.
    pub fn new(teacher_id: TeacherId, subject_id: SubjectId) -> Self {
        Self {
            teacher_id,
            subject_id,
            weekly_hours: default_weekly_hours(),
        }
    }
}

/// States that a subject is part of a class group's curriculum.
///
/// Unique per (class group, subject) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassSubjectLink {
    /// The class group.
    pub class_group_id: ClassGroupId,
    /// The subject in the group's curriculum.
    pub subject_id: SubjectId,
}

impl ClassSubjectLink {
    /// Creates a curriculum link.
    pub fn new(class_group_id: ClassGroupId, subject_id: SubjectId) -> Self {
        Self {
            class_group_id,
            subject_id,
        }
    }
}
