//! Candidate filtering for the timetable entry form.
//!
//! These functions narrow the teacher, subject and class group pick lists
//! using the link registry. None of them fail: missing link data means
//! "no restriction", so data entry is never blocked before the curriculum
//! has been set up.

use std::collections::HashSet;

use tracing::debug;

use crate::models::{
    ClassGroup, ClassGroupId, ClassPeriod, ClassSubjectLink, ShiftId, Subject, SubjectId,
    Teacher, TeacherId, TeacherSubjectLink,
};

use super::LinkRegistry;

/// Falls back to the full list when a restriction left nothing to pick.
///
/// An empty selector is a dead end for the user, so an empty result is
/// replaced by the unrestricted list. This is a usability guard, not a
/// correctness rule; the validator still enforces the links on submit.
fn or_unrestricted<'a, T>(restricted: Vec<&'a T>, all: &'a [T]) -> Vec<&'a T> {
    if restricted.is_empty() {
        all.iter().collect()
    } else {
        restricted
    }
}

/// Narrows the teacher list to those linked to the selected subject.
///
/// Returns the full list when no subject is selected, when there are no
/// teacher links at all, or when no listed teacher is linked to the subject.
///
/// # Examples
///
/// ```
/// use timetable_engine::construction::filter_teachers;
/// use timetable_engine::models::{SubjectId, Teacher, TeacherId, TeacherSubjectLink};
///
/// let teachers = vec![
///     Teacher { id: TeacherId(1), name: "Ana".to_string(), department: None, active: true },
///     Teacher { id: TeacherId(2), name: "Bruno".to_string(), department: None, active: true },
/// ];
/// let links = vec![TeacherSubjectLink::new(TeacherId(2), SubjectId(7))];
///
/// let filtered = filter_teachers(Some(SubjectId(7)), &teachers, &links);
/// assert_eq!(filtered.len(), 1);
/// assert_eq!(filtered[0].id, TeacherId(2));
///
/// // Empty registry: no restriction
/// assert_eq!(filter_teachers(Some(SubjectId(7)), &teachers, &[]).len(), 2);
/// ```
pub fn filter_teachers<'a>(
    subject: Option<SubjectId>,
    all_teachers: &'a [Teacher],
    links: &[TeacherSubjectLink],
) -> Vec<&'a Teacher> {
    let Some(subject) = subject else {
        return all_teachers.iter().collect();
    };
    if links.is_empty() {
        return all_teachers.iter().collect();
    }

    let registry = LinkRegistry::new(links, &[]);
    let empty = HashSet::new();
    let allowed = registry.teachers_for_subject(subject).unwrap_or(&empty);

    let restricted: Vec<&Teacher> = all_teachers
        .iter()
        .filter(|teacher| allowed.contains(&teacher.id))
        .collect();

    debug!(
        subject_id = %subject,
        linked = allowed.len(),
        matched = restricted.len(),
        "Filtered teachers by subject"
    );

    or_unrestricted(restricted, all_teachers)
}

/// Narrows the subject list by the selected teacher and class group.
///
/// Each selection contributes a restriction only when it is set and its link
/// relation has entries; a subject must pass every active restriction. If
/// nothing passes, the full list is returned.
pub fn filter_subjects<'a>(
    teacher: Option<TeacherId>,
    class_group: Option<ClassGroupId>,
    all_subjects: &'a [Subject],
    teacher_links: &[TeacherSubjectLink],
    class_links: &[ClassSubjectLink],
) -> Vec<&'a Subject> {
    let registry = LinkRegistry::new(teacher_links, class_links);
    let empty = HashSet::new();

    let allowed_by_teacher = match teacher {
        Some(teacher) if !registry.has_no_teacher_links() => {
            Some(registry.subjects_for_teacher(teacher).unwrap_or(&empty))
        }
        _ => None,
    };
    let allowed_by_class_group = match class_group {
        Some(class_group) if !registry.has_no_class_links() => {
            Some(registry.subjects_for_class_group(class_group).unwrap_or(&empty))
        }
        _ => None,
    };

    if allowed_by_teacher.is_none() && allowed_by_class_group.is_none() {
        return all_subjects.iter().collect();
    }

    let restricted: Vec<&Subject> = all_subjects
        .iter()
        .filter(|subject| allowed_by_teacher.is_none_or(|allowed| allowed.contains(&subject.id)))
        .filter(|subject| {
            allowed_by_class_group.is_none_or(|allowed| allowed.contains(&subject.id))
        })
        .collect();

    or_unrestricted(restricted, all_subjects)
}

/// Lists the class groups that can receive an entry for the current selection.
///
/// Only groups of the selected shift that have at least one curriculum link
/// are offered. With a subject selected the group must carry that subject,
/// and a selected teacher must teach it. With only a teacher selected the
/// group must share at least one subject with the teacher. Without a shift
/// the list is empty. Unlike the teacher and subject filters there is no
/// fallback here: an empty list is a legitimate answer.
pub fn filter_class_groups<'a>(
    shift: Option<ShiftId>,
    teacher: Option<TeacherId>,
    subject: Option<SubjectId>,
    all_class_groups: &'a [ClassGroup],
    teacher_links: &[TeacherSubjectLink],
    class_links: &[ClassSubjectLink],
) -> Vec<&'a ClassGroup> {
    let Some(shift) = shift else {
        return Vec::new();
    };
    let registry = LinkRegistry::new(teacher_links, class_links);
    let teacher_subjects = teacher.map(|t| registry.subjects_for_teacher(t));

    all_class_groups
        .iter()
        .filter(|group| group.shift_id == shift)
        .filter(|group| {
            let Some(curriculum) = registry
                .subjects_for_class_group(group.id)
                .filter(|subjects| !subjects.is_empty())
            else {
                return false;
            };

            match (subject, teacher_subjects) {
                (Some(subject), Some(taught)) => {
                    curriculum.contains(&subject)
                        && taught.is_some_and(|taught| taught.contains(&subject))
                }
                (Some(subject), None) => curriculum.contains(&subject),
                (None, Some(taught)) => {
                    taught.is_some_and(|taught| !taught.is_disjoint(curriculum))
                }
                (None, None) => true,
            }
        })
        .collect()
}

/// Returns the only teacher linked to `subject`, if exactly one is.
///
/// Used to pre-select the teacher once a subject has been picked.
pub fn sole_teacher_for_subject(
    subject: SubjectId,
    links: &[TeacherSubjectLink],
) -> Option<TeacherId> {
    let registry = LinkRegistry::new(links, &[]);
    match registry.teachers_for_subject(subject) {
        Some(teachers) if teachers.len() == 1 => teachers.iter().next().copied(),
        _ => None,
    }
}

/// Lists the periods a timetable entry can be placed in: the active lessons
/// of `shift`, in chronological order.
pub fn selectable_periods(shift: ShiftId, periods: &[ClassPeriod]) -> Vec<&ClassPeriod> {
    let mut selectable: Vec<&ClassPeriod> = periods
        .iter()
        .filter(|period| period.shift_id == shift && period.is_lesson() && period.active)
        .collect();
    selectable.sort_by_key(|period| period.start_time);
    selectable
}
