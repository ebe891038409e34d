//! Indexed view over the two link relations.

use std::collections::{HashMap, HashSet};

use crate::models::{ClassGroupId, ClassSubjectLink, SubjectId, TeacherId, TeacherSubjectLink};

/// Read-only index over teacher↔subject and class-group↔subject links.
///
/// The registry never mutates the links it was built from; it only answers
/// lookups. Duplicate link rows collapse to a single pair.
#[derive(Debug, Clone, Default)]
pub struct LinkRegistry {
    subjects_by_teacher: HashMap<TeacherId, HashSet<SubjectId>>,
    teachers_by_subject: HashMap<SubjectId, HashSet<TeacherId>>,
    subjects_by_class_group: HashMap<ClassGroupId, HashSet<SubjectId>>,
}

impl LinkRegistry {
    /// Builds the registry from already-fetched link lists.
    pub fn new(teacher_links: &[TeacherSubjectLink], class_links: &[ClassSubjectLink]) -> Self {
        let mut registry = Self::default();
        for link in teacher_links {
            registry
                .subjects_by_teacher
                .entry(link.teacher_id)
                .or_default()
                .insert(link.subject_id);
            registry
                .teachers_by_subject
                .entry(link.subject_id)
                .or_default()
                .insert(link.teacher_id);
        }
        for link in class_links {
            registry
                .subjects_by_class_group
                .entry(link.class_group_id)
                .or_default()
                .insert(link.subject_id);
        }
        registry
    }

    /// Returns true if no teacher↔subject link exists at all.
    pub fn has_no_teacher_links(&self) -> bool {
        self.subjects_by_teacher.is_empty()
    }

    /// Returns true if no class-group↔subject link exists at all.
    pub fn has_no_class_links(&self) -> bool {
        self.subjects_by_class_group.is_empty()
    }

    /// Teachers linked to `subject`.
    pub fn teachers_for_subject(&self, subject: SubjectId) -> Option<&HashSet<TeacherId>> {
        self.teachers_by_subject.get(&subject)
    }

    /// Subjects linked to `teacher`.
    pub fn subjects_for_teacher(&self, teacher: TeacherId) -> Option<&HashSet<SubjectId>> {
        self.subjects_by_teacher.get(&teacher)
    }

    /// Subjects in the curriculum of `class_group`.
    pub fn subjects_for_class_group(
        &self,
        class_group: ClassGroupId,
    ) -> Option<&HashSet<SubjectId>> {
        self.subjects_by_class_group.get(&class_group)
    }

    /// Returns true if `teacher` is linked to `subject`.
    pub fn teaches(&self, teacher: TeacherId, subject: SubjectId) -> bool {
        self.subjects_for_teacher(teacher)
            .is_some_and(|subjects| subjects.contains(&subject))
    }

    /// Returns true if `subject` is in the curriculum of `class_group`.
    pub fn offers(&self, class_group: ClassGroupId, subject: SubjectId) -> bool {
        self.subjects_for_class_group(class_group)
            .is_some_and(|subjects| subjects.contains(&subject))
    }
}
