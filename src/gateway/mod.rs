//! Persistence boundary.
//!
//! The construction engine never stores anything itself. This module defines
//! the [`PersistenceGateway`] trait the surrounding application implements,
//! an [`InMemoryGateway`] reference implementation, and the workflows that
//! tie the pure engine to a store: generating periods for a shift, then
//! scheduling and removing entries.

mod memory;
mod workflow;

use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::models::{
    ClassGroup, ClassGroupId, ClassPeriod, ClassSubjectLink, Shift, ShiftId, Subject, Teacher,
    TeacherId, TeacherSubjectLink, TimetableEntry, TimetableEntryId, Weekday,
};

pub use memory::InMemoryGateway;
pub use workflow::{
    find_shift, generate_for_shift, remove_entry, schedule_entry, schedule_entry_with_periods,
};

/// Durable store for shifts, periods, links and timetable entries.
///
/// Failures are reported as opaque [`PersistenceError`]s and passed back to
/// the caller unchanged.
pub trait PersistenceGateway: Send + Sync {
    /// Lists all shifts.
    fn list_shifts(&self) -> Result<Vec<Shift>, PersistenceError>;

    /// Lists the class periods of one shift.
    fn list_class_periods(&self, shift: ShiftId) -> Result<Vec<ClassPeriod>, PersistenceError>;

    /// Lists all teacher↔subject links.
    fn list_teacher_links(&self) -> Result<Vec<TeacherSubjectLink>, PersistenceError>;

    /// Lists all class-group↔subject links.
    fn list_class_links(&self) -> Result<Vec<ClassSubjectLink>, PersistenceError>;

    /// Lists all teachers.
    fn list_teachers(&self) -> Result<Vec<Teacher>, PersistenceError>;

    /// Lists all subjects.
    fn list_subjects(&self) -> Result<Vec<Subject>, PersistenceError>;

    /// Lists all class groups.
    fn list_class_groups(&self) -> Result<Vec<ClassGroup>, PersistenceError>;

    /// Stores a batch of class periods and returns them with ids assigned.
    ///
    /// The whole batch is refused if any period shares a lesson number or
    /// an overlapping window with another period of its shift, stored or in
    /// the same batch.
    fn create_class_periods(
        &self,
        periods: Vec<ClassPeriod>,
    ) -> Result<Vec<ClassPeriod>, PersistenceError>;

    /// Stores a validated timetable entry and returns it with its id.
    fn create_timetable_entry(
        &self,
        entry: TimetableEntry,
    ) -> Result<TimetableEntry, PersistenceError>;

    /// Deletes a timetable entry, returning it, or `None` if no entry has
    /// that id.
    fn delete_timetable_entry(
        &self,
        id: TimetableEntryId,
    ) -> Result<Option<TimetableEntry>, PersistenceError>;

    /// Lists the timetable entries matching `query`.
    fn list_timetable_entries(
        &self,
        query: &TimetableQuery,
    ) -> Result<Vec<TimetableEntry>, PersistenceError>;
}

/// Filter for listing timetable entries. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableQuery {
    /// Only entries on this day.
    #[serde(default)]
    pub weekday: Option<Weekday>,
    /// Only entries of this shift.
    #[serde(default)]
    pub shift_id: Option<ShiftId>,
    /// Only entries of this class group.
    #[serde(default)]
    pub class_group_id: Option<ClassGroupId>,
    /// Only entries of this teacher.
    #[serde(default)]
    pub teacher_id: Option<TeacherId>,
}

impl TimetableQuery {
    /// Returns true if `entry` passes every set field.
    pub fn matches(&self, entry: &TimetableEntry) -> bool {
        self.weekday.is_none_or(|day| entry.weekday == day)
            && self.shift_id.is_none_or(|shift| entry.shift_id == shift)
            && self
                .class_group_id
                .is_none_or(|group| entry.class_group_id == group)
            && self.teacher_id.is_none_or(|teacher| entry.teacher_id == teacher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubjectId;
    use chrono::NaiveTime;

    fn entry(weekday: Weekday, teacher: u32, group: u32) -> TimetableEntry {
        TimetableEntry {
            id: None,
            teacher_id: TeacherId(teacher),
            subject_id: SubjectId(7),
            class_group_id: ClassGroupId(group),
            shift_id: ShiftId(1),
            weekday,
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(8, 50, 0).unwrap(),
            room: None,
            notes: None,
        }
    }

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(TimetableQuery::default().matches(&entry(Weekday::Sat, 1, 3)));
    }

    #[test]
    fn test_query_fields_combine() {
        let query = TimetableQuery {
            weekday: Some(Weekday::Mon),
            teacher_id: Some(TeacherId(1)),
            ..Default::default()
        };
        assert!(query.matches(&entry(Weekday::Mon, 1, 3)));
        assert!(!query.matches(&entry(Weekday::Mon, 2, 3)));
        assert!(!query.matches(&entry(Weekday::Tue, 1, 3)));
    }
}
