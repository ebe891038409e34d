//! Workflows connecting the pure engine to a store.
//!
//! Each function fetches what the engine needs, runs it, and hands the result
//! to the gateway. Errors from either side propagate unchanged.

use tracing::{info, warn};

use crate::construction::{PeriodPlan, generate_periods, validate_entry};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ClassPeriod, ProposedTimetableEntry, Shift, ShiftId, TimetableEntry, TimetableEntryId,
};

use super::PersistenceGateway;

/// Looks up a stored shift.
///
/// # Errors
///
/// - [`EngineError::ShiftNotFound`] if no shift has that id
/// - [`EngineError::Persistence`] if the store fails
pub fn find_shift<G: PersistenceGateway + ?Sized>(
    gateway: &G,
    shift_id: ShiftId,
) -> EngineResult<Shift> {
    gateway
        .list_shifts()?
        .into_iter()
        .find(|shift| shift.id == shift_id)
        .ok_or(EngineError::ShiftNotFound { shift_id })
}

/// Generates class periods for a shift already read from the store and
/// persists them.
///
/// # Errors
///
/// - [`EngineError::InvalidParameter`] if the plan is rejected by the generator
/// - [`EngineError::Persistence`] if the store fails, or refuses the batch
///   because the shift already has periods in those windows
pub fn generate_for_shift<G: PersistenceGateway + ?Sized>(
    gateway: &G,
    shift: &Shift,
    plan: &PeriodPlan,
) -> EngineResult<Vec<ClassPeriod>> {
    let periods = generate_periods(shift.id, plan)?;

    let last_end = periods.last().map(|p| p.end_time);
    if let Some(last_end) = last_end.filter(|end| !shift.covers(plan.shift_start, *end)) {
        warn!(
            shift_id = %shift.id,
            shift_end = %shift.end_time,
            last_period_end = %last_end,
            "Generated periods fall outside the shift's nominal window"
        );
    }

    let stored = gateway.create_class_periods(periods)?;
    info!(shift_id = %shift.id, count = stored.len(), "Class periods generated");
    Ok(stored)
}

/// Validates a proposed entry against the stored periods and links, then
/// persists it.
///
/// # Errors
///
/// - [`EngineError::Validation`] if the entry fails validation
/// - [`EngineError::Persistence`] if the store fails or refuses the entry
pub fn schedule_entry<G: PersistenceGateway + ?Sized>(
    gateway: &G,
    proposal: &ProposedTimetableEntry,
) -> EngineResult<TimetableEntry> {
    let periods = gateway.list_class_periods(proposal.shift_id)?;
    schedule_entry_with_periods(gateway, proposal, &periods)
}

/// Same as [`schedule_entry`], for callers that already hold the periods of
/// the proposal's shift.
pub fn schedule_entry_with_periods<G: PersistenceGateway + ?Sized>(
    gateway: &G,
    proposal: &ProposedTimetableEntry,
    periods_of_shift: &[ClassPeriod],
) -> EngineResult<TimetableEntry> {
    let teacher_links = gateway.list_teacher_links()?;
    let class_links = gateway.list_class_links()?;

    let entry = validate_entry(proposal, periods_of_shift, &teacher_links, &class_links)?;
    let stored = gateway.create_timetable_entry(entry)?;

    info!(
        entry_id = ?stored.id,
        teacher_id = %stored.teacher_id,
        class_group_id = %stored.class_group_id,
        weekday = %stored.weekday,
        "Timetable entry scheduled"
    );
    Ok(stored)
}

/// Deletes a stored entry and returns it.
///
/// # Errors
///
/// - [`EngineError::EntryNotFound`] if no entry has that id
/// - [`EngineError::Persistence`] if the store fails
pub fn remove_entry<G: PersistenceGateway + ?Sized>(
    gateway: &G,
    entry_id: TimetableEntryId,
) -> EngineResult<TimetableEntry> {
    let removed = gateway
        .delete_timetable_entry(entry_id)?
        .ok_or(EngineError::EntryNotFound { entry_id })?;

    info!(entry_id = %entry_id, weekday = %removed.weekday, "Timetable entry removed");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeedData;
    use crate::error::ValidationError;
    use crate::gateway::{InMemoryGateway, TimetableQuery};
    use crate::models::{
        ClassGroupId, ClassSubjectLink, PeriodKind, Shift, SubjectId, TeacherId,
        TeacherSubjectLink, Weekday,
    };
    use chrono::NaiveTime;

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn gateway() -> InMemoryGateway {
        InMemoryGateway::from_seed(&SeedData {
            shifts: vec![Shift {
                id: ShiftId(1),
                name: "Matutino".to_string(),
                start_time: time("08:00"),
                end_time: time("12:30"),
                active: true,
            }],
            teacher_subject_links: vec![TeacherSubjectLink::new(TeacherId(1), SubjectId(7))],
            class_subject_links: vec![ClassSubjectLink::new(ClassGroupId(3), SubjectId(7))],
            ..SeedData::default()
        })
    }

    fn shift(gateway: &InMemoryGateway) -> Shift {
        find_shift(gateway, ShiftId(1)).unwrap()
    }

    fn plan() -> PeriodPlan {
        PeriodPlan {
            shift_start: time("08:00"),
            lesson_count: 5,
            lesson_minutes: 50,
            break_minutes: 20,
            break_after_lesson: 2,
            break_label: "Intervalo".to_string(),
        }
    }

    fn proposal(period: Option<ClassPeriod>) -> ProposedTimetableEntry {
        ProposedTimetableEntry {
            teacher_id: TeacherId(1),
            subject_id: SubjectId(7),
            class_group_id: ClassGroupId(3),
            shift_id: ShiftId(1),
            weekday: Weekday::Wed,
            period,
            room: Some("Sala 2".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_generate_for_shift_persists_periods() {
        let gateway = gateway();
        let shift = find_shift(&gateway, ShiftId(1)).unwrap();
        let stored = generate_for_shift(&gateway, &shift, &plan()).unwrap();

        assert_eq!(stored.len(), 6);
        assert!(stored.iter().all(|p| p.id.is_some()));
        assert_eq!(gateway.list_class_periods(ShiftId(1)).unwrap(), stored);
    }

    #[test]
    fn test_find_unknown_shift() {
        let result = find_shift(&gateway(), ShiftId(99));
        assert!(matches!(
            result,
            Err(EngineError::ShiftNotFound { shift_id }) if shift_id == ShiftId(99)
        ));
    }

    #[test]
    fn test_generate_with_bad_plan_stores_nothing() {
        let gateway = gateway();
        let mut bad = plan();
        bad.break_after_lesson = 9;

        assert!(matches!(
            generate_for_shift(&gateway, &shift(&gateway), &bad),
            Err(EngineError::InvalidParameter { .. })
        ));
        assert!(gateway.list_class_periods(ShiftId(1)).unwrap().is_empty());
    }

    #[test]
    fn test_schedule_entry_round_trip() {
        let gateway = gateway();
        let stored = generate_for_shift(&gateway, &shift(&gateway), &plan()).unwrap();
        let third_lesson = stored
            .iter()
            .find(|p| p.kind == PeriodKind::Lesson && p.sequence == Some(3))
            .cloned();

        let entry = schedule_entry(&gateway, &proposal(third_lesson)).unwrap();

        assert!(entry.id.is_some());
        assert_eq!(entry.start_time, time("10:00"));
        assert_eq!(entry.end_time, time("10:50"));
        let listed = gateway
            .list_timetable_entries(&TimetableQuery {
                weekday: Some(Weekday::Wed),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(listed, vec![entry]);
    }

    #[test]
    fn test_schedule_entry_without_generated_periods() {
        let gateway = gateway();
        let draft = generate_periods(ShiftId(1), &plan()).unwrap()[0].clone();

        let result = schedule_entry(&gateway, &proposal(Some(draft)));
        assert!(matches!(
            result,
            Err(EngineError::Validation(ValidationError::PeriodNotInShift { .. }))
        ));
    }

    #[test]
    fn test_schedule_entry_surfaces_store_conflict() {
        let gateway = gateway().with_double_booking_guard(true);
        let stored = generate_for_shift(&gateway, &shift(&gateway), &plan()).unwrap();
        let first = Some(stored[0].clone());

        schedule_entry(&gateway, &proposal(first.clone())).unwrap();
        let result = schedule_entry(&gateway, &proposal(first));

        assert!(matches!(result, Err(EngineError::Persistence(_))));
    }

    #[test]
    fn test_generating_twice_keeps_the_first_layout() {
        let gateway = gateway();
        let shift = shift(&gateway);
        let first = generate_for_shift(&gateway, &shift, &plan()).unwrap();

        let again = generate_for_shift(&gateway, &shift, &plan());
        assert!(matches!(again, Err(EngineError::Persistence(_))));

        let listed = gateway.list_class_periods(ShiftId(1)).unwrap();
        assert_eq!(listed, first);
        for pair in listed.windows(2) {
            assert_eq!(pair[0].end_time, pair[1].start_time);
        }
    }

    #[test]
    fn test_schedule_entry_with_prefetched_periods() {
        let gateway = gateway();
        let stored = generate_for_shift(&gateway, &shift(&gateway), &plan()).unwrap();

        let entry =
            schedule_entry_with_periods(&gateway, &proposal(Some(stored[0].clone())), &stored)
                .unwrap();
        assert_eq!(entry.start_time, time("08:00"));
    }

    #[test]
    fn test_remove_entry() {
        let gateway = gateway();
        let stored = generate_for_shift(&gateway, &shift(&gateway), &plan()).unwrap();
        let entry = schedule_entry(&gateway, &proposal(Some(stored[0].clone()))).unwrap();
        let Some(id) = entry.id else {
            panic!("stored entry has no id");
        };

        assert_eq!(remove_entry(&gateway, id).unwrap(), entry);
        assert!(matches!(
            remove_entry(&gateway, id),
            Err(EngineError::EntryNotFound { entry_id }) if entry_id == id
        ));
    }
}
