//! Timetable entry validation.
//!
//! The validator checks that a proposed entry refers to a real lesson of its
//! shift and that the teacher and class group are both linked to the subject.
//! It does no I/O and keeps no state between calls.
//!
//! It does not look for overlapping entries of the same teacher, class group
//! or room; that belongs to the store (see the double-booking guard of
//! [`InMemoryGateway`](crate::gateway::InMemoryGateway)).

use tracing::{debug, warn};

use super::LinkRegistry;
use crate::error::ValidationError;
use crate::models::{
    ClassPeriod, ClassSubjectLink, ProposedTimetableEntry, TeacherSubjectLink, TimetableEntry,
};

/// Checks the selected period and returns it.
fn check_period<'a>(
    proposal: &'a ProposedTimetableEntry,
    periods_of_shift: &[ClassPeriod],
) -> Result<&'a ClassPeriod, ValidationError> {
    let period = proposal
        .period
        .as_ref()
        .ok_or(ValidationError::MissingPeriod)?;

    if !period.is_lesson() {
        return Err(ValidationError::NotALessonPeriod {
            kind: period.kind,
            start: period.start_time,
            end: period.end_time,
        });
    }

    let in_shift = periods_of_shift
        .iter()
        .any(|p| p.shift_id == proposal.shift_id && p.is_lesson() && p.same_window(period));
    if !in_shift {
        return Err(ValidationError::PeriodNotInShift {
            shift_id: proposal.shift_id,
            start: period.start_time,
            end: period.end_time,
        });
    }

    Ok(period)
}

/// Validates a proposed timetable entry.
///
/// Checks run in this order and stop at the first failure:
///
/// 1. A period is selected ([`ValidationError::MissingPeriod`]), it is a
///    lesson ([`ValidationError::NotALessonPeriod`]) and its time window is
///    one of the shift's lessons ([`ValidationError::PeriodNotInShift`]).
/// 2. The teacher is linked to the subject
///    ([`ValidationError::TeacherNotLinkedToSubject`]).
/// 3. The class group is linked to the subject
///    ([`ValidationError::SubjectNotLinkedToClassGroup`]).
///
/// On success the entry takes its start and end from the selected period and
/// has no id yet.
///
/// # Examples
///
/// ```
/// use timetable_engine::construction::{generate_periods, validate_entry, PeriodPlan};
/// use timetable_engine::models::*;
/// use chrono::NaiveTime;
///
/// let plan = PeriodPlan {
///     shift_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     lesson_count: 5,
///     lesson_minutes: 50,
///     break_minutes: 20,
///     break_after_lesson: 2,
///     break_label: "Intervalo".to_string(),
/// };
/// let periods = generate_periods(ShiftId(1), &plan).unwrap();
///
/// let proposal = ProposedTimetableEntry {
///     teacher_id: TeacherId(1),
///     subject_id: SubjectId(7),
///     class_group_id: ClassGroupId(3),
///     shift_id: ShiftId(1),
///     weekday: Weekday::Mon,
///     period: Some(periods[0].clone()),
///     room: None,
///     notes: None,
/// };
///
/// let entry = validate_entry(
///     &proposal,
///     &periods,
///     &[TeacherSubjectLink::new(TeacherId(1), SubjectId(7))],
///     &[ClassSubjectLink::new(ClassGroupId(3), SubjectId(7))],
/// )
/// .unwrap();
/// assert_eq!(entry.start_time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
/// assert_eq!(entry.end_time, NaiveTime::from_hms_opt(8, 50, 0).unwrap());
/// ```
pub fn validate_entry(
    proposal: &ProposedTimetableEntry,
    periods_of_shift: &[ClassPeriod],
    teacher_links: &[TeacherSubjectLink],
    class_links: &[ClassSubjectLink],
) -> Result<TimetableEntry, ValidationError> {
    let result = check(proposal, periods_of_shift, teacher_links, class_links);

    match &result {
        Ok(entry) => debug!(
            teacher_id = %entry.teacher_id,
            subject_id = %entry.subject_id,
            class_group_id = %entry.class_group_id,
            weekday = %entry.weekday,
            start = %entry.start_time,
            "Timetable entry validated"
        ),
        Err(err) => warn!(
            teacher_id = %proposal.teacher_id,
            subject_id = %proposal.subject_id,
            class_group_id = %proposal.class_group_id,
            code = err.code(),
            "Timetable entry rejected"
        ),
    }

    result
}

fn check(
    proposal: &ProposedTimetableEntry,
    periods_of_shift: &[ClassPeriod],
    teacher_links: &[TeacherSubjectLink],
    class_links: &[ClassSubjectLink],
) -> Result<TimetableEntry, ValidationError> {
    let period = check_period(proposal, periods_of_shift)?;

    let registry = LinkRegistry::new(teacher_links, class_links);

    if !registry.teaches(proposal.teacher_id, proposal.subject_id) {
        return Err(ValidationError::TeacherNotLinkedToSubject {
            teacher_id: proposal.teacher_id,
            subject_id: proposal.subject_id,
        });
    }

    if !registry.offers(proposal.class_group_id, proposal.subject_id) {
        return Err(ValidationError::SubjectNotLinkedToClassGroup {
            class_group_id: proposal.class_group_id,
            subject_id: proposal.subject_id,
        });
    }

    Ok(TimetableEntry {
        id: None,
        teacher_id: proposal.teacher_id,
        subject_id: proposal.subject_id,
        class_group_id: proposal.class_group_id,
        shift_id: proposal.shift_id,
        weekday: proposal.weekday,
        start_time: period.start_time,
        end_time: period.end_time,
        room: proposal.room.clone(),
        notes: proposal.notes.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::{PeriodPlan, generate_periods};
    use crate::models::{ClassGroupId, PeriodKind, ShiftId, SubjectId, TeacherId, Weekday};
    use chrono::NaiveTime;

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn periods() -> Vec<ClassPeriod> {
        let plan = PeriodPlan {
            shift_start: time("08:00"),
            lesson_count: 5,
            lesson_minutes: 50,
            break_minutes: 20,
            break_after_lesson: 2,
            break_label: "Intervalo".to_string(),
        };
        generate_periods(ShiftId(1), &plan).unwrap()
    }

    fn proposal(period: Option<ClassPeriod>) -> ProposedTimetableEntry {
        ProposedTimetableEntry {
            teacher_id: TeacherId(1),
            subject_id: SubjectId(7),
            class_group_id: ClassGroupId(3),
            shift_id: ShiftId(1),
            weekday: Weekday::Tue,
            period,
            room: Some("Sala 4".to_string()),
            notes: Some("Laboratório".to_string()),
        }
    }

    fn teacher_links() -> Vec<TeacherSubjectLink> {
        vec![TeacherSubjectLink::new(TeacherId(1), SubjectId(7))]
    }

    fn class_links() -> Vec<ClassSubjectLink> {
        vec![ClassSubjectLink::new(ClassGroupId(3), SubjectId(7))]
    }

    /// TV-001: fully linked entry in the first lesson
    #[test]
    fn test_valid_entry_takes_period_window() {
        let periods = periods();
        let entry = validate_entry(
            &proposal(Some(periods[0].clone())),
            &periods,
            &teacher_links(),
            &class_links(),
        )
        .unwrap();

        assert_eq!(entry.id, None);
        assert_eq!(entry.start_time, time("08:00"));
        assert_eq!(entry.end_time, time("08:50"));
        assert_eq!(entry.weekday, Weekday::Tue);
        assert_eq!(entry.room.as_deref(), Some("Sala 4"));
        assert_eq!(entry.notes.as_deref(), Some("Laboratório"));
    }

    #[test]
    fn test_links_of_other_pairs_do_not_count() {
        let periods = periods();
        let other_teacher_links = vec![
            TeacherSubjectLink::new(TeacherId(1), SubjectId(8)),
            TeacherSubjectLink::new(TeacherId(2), SubjectId(7)),
        ];
        let other_class_links = vec![
            ClassSubjectLink::new(ClassGroupId(3), SubjectId(8)),
            ClassSubjectLink::new(ClassGroupId(4), SubjectId(7)),
        ];
        let selected = proposal(Some(periods[0].clone()));

        let result = validate_entry(&selected, &periods, &other_teacher_links, &class_links());
        assert!(matches!(
            result,
            Err(ValidationError::TeacherNotLinkedToSubject { .. })
        ));

        let result = validate_entry(&selected, &periods, &teacher_links(), &other_class_links);
        assert!(matches!(
            result,
            Err(ValidationError::SubjectNotLinkedToClassGroup { .. })
        ));
    }

    /// TV-002: class link missing
    #[test]
    fn test_missing_class_link_is_rejected() {
        let periods = periods();
        let result = validate_entry(
            &proposal(Some(periods[0].clone())),
            &periods,
            &teacher_links(),
            &[],
        );

        assert_eq!(
            result,
            Err(ValidationError::SubjectNotLinkedToClassGroup {
                class_group_id: ClassGroupId(3),
                subject_id: SubjectId(7),
            })
        );
    }

    #[test]
    fn test_missing_teacher_link_is_rejected_even_with_class_link() {
        let periods = periods();
        let result = validate_entry(
            &proposal(Some(periods[0].clone())),
            &periods,
            &[TeacherSubjectLink::new(TeacherId(2), SubjectId(7))],
            &class_links(),
        );

        assert!(matches!(
            result,
            Err(ValidationError::TeacherNotLinkedToSubject { .. })
        ));
    }

    #[test]
    fn test_teacher_check_runs_before_class_check() {
        let periods = periods();
        let result = validate_entry(&proposal(Some(periods[0].clone())), &periods, &[], &[]);

        assert!(matches!(
            result,
            Err(ValidationError::TeacherNotLinkedToSubject { .. })
        ));
    }

    #[test]
    fn test_missing_period_is_reported_first() {
        let result = validate_entry(&proposal(None), &periods(), &[], &[]);
        assert_eq!(result, Err(ValidationError::MissingPeriod));
    }

    #[test]
    fn test_break_period_is_rejected_regardless_of_links() {
        let periods = periods();
        let break_period = periods
            .iter()
            .find(|p| p.kind == PeriodKind::Break)
            .cloned();

        let result = validate_entry(
            &proposal(break_period),
            &periods,
            &teacher_links(),
            &class_links(),
        );

        assert_eq!(
            result,
            Err(ValidationError::NotALessonPeriod {
                kind: PeriodKind::Break,
                start: time("09:40"),
                end: time("10:00"),
            })
        );
    }

    #[test]
    fn test_lesson_outside_shift_is_rejected() {
        let periods = periods();
        let mut stray = periods[0].clone();
        stray.start_time = time("07:10");
        stray.end_time = time("08:00");

        let result = validate_entry(
            &proposal(Some(stray)),
            &periods,
            &teacher_links(),
            &class_links(),
        );

        assert!(matches!(
            result,
            Err(ValidationError::PeriodNotInShift { .. })
        ));
    }

    #[test]
    fn test_lesson_of_another_shift_is_rejected() {
        let periods = periods();
        let mut other = proposal(Some(periods[0].clone()));
        other.shift_id = ShiftId(2);

        let result = validate_entry(&other, &periods, &teacher_links(), &class_links());

        assert_eq!(
            result,
            Err(ValidationError::PeriodNotInShift {
                shift_id: ShiftId(2),
                start: time("08:00"),
                end: time("08:50"),
            })
        );
    }

    #[test]
    fn test_persisted_period_matches_by_window() {
        let mut stored = periods();
        for (i, period) in stored.iter_mut().enumerate() {
            period.id = Some(crate::models::ClassPeriodId(100 + i as u32));
        }
        // selection made from drafts still lines up with the stored lessons
        let draft = periods()[4].clone();

        let entry = validate_entry(
            &proposal(Some(draft)),
            &stored,
            &teacher_links(),
            &class_links(),
        )
        .unwrap();
        assert_eq!(entry.start_time, time("10:50"));
    }
}
