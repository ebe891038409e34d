//! In-memory persistence gateway.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::config::SeedData;
use crate::error::PersistenceError;
use crate::models::{
    ClassGroup, ClassPeriod, ClassPeriodId, ClassSubjectLink, Shift, ShiftId, Subject, Teacher,
    TeacherSubjectLink, TimetableEntry, TimetableEntryId,
};

use super::{PersistenceGateway, TimetableQuery};

#[derive(Debug, Default)]
struct Store {
    shifts: Vec<Shift>,
    teachers: Vec<Teacher>,
    subjects: Vec<Subject>,
    class_groups: Vec<ClassGroup>,
    teacher_links: Vec<TeacherSubjectLink>,
    class_links: Vec<ClassSubjectLink>,
    periods: Vec<ClassPeriod>,
    entries: Vec<TimetableEntry>,
    last_period_id: u32,
    last_entry_id: u32,
}

/// A [`PersistenceGateway`] that keeps everything in memory.
///
/// Ids are assigned sequentially starting at 1. By default entries are
/// stored without any overlap check, matching the engine's link-only
/// validation; see [`with_double_booking_guard`](Self::with_double_booking_guard).
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    store: RwLock<Store>,
    reject_double_booking: bool,
}

impl InMemoryGateway {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with seed records.
    pub fn from_seed(seed: &SeedData) -> Self {
        let store = Store {
            shifts: seed.shifts.clone(),
            teachers: seed.teachers.clone(),
            subjects: seed.subjects.clone(),
            class_groups: seed.class_groups.clone(),
            teacher_links: seed.teacher_subject_links.clone(),
            class_links: seed.class_subject_links.clone(),
            ..Store::default()
        };
        Self {
            store: RwLock::new(store),
            reject_double_booking: false,
        }
    }

    /// Enables or disables rejection of overlapping entries.
    ///
    /// When enabled, an entry is refused if an existing entry of the same
    /// teacher or the same class group overlaps it on the same day.
    pub fn with_double_booking_guard(mut self, enabled: bool) -> Self {
        self.reject_double_booking = enabled;
        self
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Store>, PersistenceError> {
        self.store
            .read()
            .map_err(|_| PersistenceError::new("in-memory store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Store>, PersistenceError> {
        self.store
            .write()
            .map_err(|_| PersistenceError::new("in-memory store lock poisoned"))
    }
}

/// Two periods of one shift clash when they share a lesson number or their
/// windows overlap. Touching windows do not overlap.
fn periods_clash(a: &ClassPeriod, b: &ClassPeriod) -> bool {
    if a.shift_id != b.shift_id {
        return false;
    }
    let same_sequence = a.sequence.is_some() && a.sequence == b.sequence;
    same_sequence || (a.start_time < b.end_time && b.start_time < a.end_time)
}

impl PersistenceGateway for InMemoryGateway {
    fn list_shifts(&self) -> Result<Vec<Shift>, PersistenceError> {
        Ok(self.read()?.shifts.clone())
    }

    fn list_class_periods(&self, shift: ShiftId) -> Result<Vec<ClassPeriod>, PersistenceError> {
        let store = self.read()?;
        let mut periods: Vec<ClassPeriod> = store
            .periods
            .iter()
            .filter(|p| p.shift_id == shift)
            .cloned()
            .collect();
        periods.sort_by_key(|p| p.start_time);
        Ok(periods)
    }

    fn list_teacher_links(&self) -> Result<Vec<TeacherSubjectLink>, PersistenceError> {
        Ok(self.read()?.teacher_links.clone())
    }

    fn list_class_links(&self) -> Result<Vec<ClassSubjectLink>, PersistenceError> {
        Ok(self.read()?.class_links.clone())
    }

    fn list_teachers(&self) -> Result<Vec<Teacher>, PersistenceError> {
        Ok(self.read()?.teachers.clone())
    }

    fn list_subjects(&self) -> Result<Vec<Subject>, PersistenceError> {
        Ok(self.read()?.subjects.clone())
    }

    fn list_class_groups(&self) -> Result<Vec<ClassGroup>, PersistenceError> {
        Ok(self.read()?.class_groups.clone())
    }

    fn create_class_periods(
        &self,
        periods: Vec<ClassPeriod>,
    ) -> Result<Vec<ClassPeriod>, PersistenceError> {
        let mut store = self.write()?;

        for (index, period) in periods.iter().enumerate() {
            let clash = store
                .periods
                .iter()
                .chain(&periods[..index])
                .find(|other| periods_clash(period, other));
            if let Some(other) = clash {
                warn!(
                    shift_id = %period.shift_id,
                    start = %period.start_time,
                    end = %period.end_time,
                    "Rejected clashing class period"
                );
                return Err(PersistenceError::new(format!(
                    "class period {}-{} clashes with period {}-{} of shift {}",
                    period.start_time,
                    period.end_time,
                    other.start_time,
                    other.end_time,
                    period.shift_id
                )));
            }
        }

        let mut created = Vec::with_capacity(periods.len());
        for mut period in periods {
            store.last_period_id += 1;
            period.id = Some(ClassPeriodId(store.last_period_id));
            store.periods.push(period.clone());
            created.push(period);
        }

        debug!(count = created.len(), "Stored class periods");
        Ok(created)
    }

    fn create_timetable_entry(
        &self,
        mut entry: TimetableEntry,
    ) -> Result<TimetableEntry, PersistenceError> {
        let mut store = self.write()?;

        if self.reject_double_booking {
            let clash = store.entries.iter().find(|existing| {
                (existing.teacher_id == entry.teacher_id
                    || existing.class_group_id == entry.class_group_id)
                    && existing.overlaps(&entry)
            });
            if let Some(existing) = clash {
                warn!(
                    teacher_id = %entry.teacher_id,
                    class_group_id = %entry.class_group_id,
                    weekday = %entry.weekday,
                    "Rejected double booking"
                );
                return Err(PersistenceError::new(format!(
                    "schedule conflict with entry {} on {} {}-{} for the teacher or class group",
                    existing.id.map(|id| id.to_string()).unwrap_or_default(),
                    existing.weekday,
                    existing.start_time,
                    existing.end_time
                )));
            }
        }

        store.last_entry_id += 1;
        entry.id = Some(TimetableEntryId(store.last_entry_id));
        store.entries.push(entry.clone());
        Ok(entry)
    }

    fn delete_timetable_entry(
        &self,
        id: TimetableEntryId,
    ) -> Result<Option<TimetableEntry>, PersistenceError> {
        let mut store = self.write()?;
        let position = store.entries.iter().position(|entry| entry.id == Some(id));
        Ok(position.map(|index| store.entries.remove(index)))
    }

    fn list_timetable_entries(
        &self,
        query: &TimetableQuery,
    ) -> Result<Vec<TimetableEntry>, PersistenceError> {
        let store = self.read()?;
        let mut entries: Vec<TimetableEntry> = store
            .entries
            .iter()
            .filter(|entry| query.matches(entry))
            .cloned()
            .collect();
        entries.sort_by_key(|entry| (entry.weekday, entry.start_time));
        Ok(entries)
    }
}
