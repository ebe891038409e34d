//! Timetable entry model and the weekday it falls on.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::{ClassGroupId, ClassPeriod, ShiftId, SubjectId, TeacherId, TimetableEntryId};

/// A teaching day of the week. Sunday is not a teaching day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    /// Monday.
    Mon,
    /// Tuesday.
    Tue,
    /// Wednesday.
    Wed,
    /// Thursday.
    Thu,
    /// Friday.
    Fri,
    /// Saturday.
    Sat,
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Weekday::Mon => "mon",
            Weekday::Tue => "tue",
            Weekday::Wed => "wed",
            Weekday::Thu => "thu",
            Weekday::Fri => "fri",
            Weekday::Sat => "sat",
        };
        write!(f, "{}", name)
    }
}

/// A timetable entry as submitted by the caller, before validation.
///
/// The entry's time window is not given directly; it is taken from the
/// selected class period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedTimetableEntry {
    /// The teacher giving the lesson.
    pub teacher_id: TeacherId,
    /// The subject being taught.
    pub subject_id: SubjectId,
    /// The class group attending.
    pub class_group_id: ClassGroupId,
    /// The shift the lesson belongs to.
    pub shift_id: ShiftId,
    /// The day of the week.
    pub weekday: Weekday,
    /// The selected class period, if any.
    #[serde(default)]
    pub period: Option<ClassPeriod>,
    /// Room label.
    #[serde(default)]
    pub room: Option<String>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// A concrete weekly assignment of teacher, subject and class group to one
/// lesson's time window.
///
/// Entries have no update-in-place semantics: an edit is a delete followed
/// by a create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableEntry {
    /// Identifier assigned by the store, `None` before persistence.
    #[serde(default)]
    pub id: Option<TimetableEntryId>,
    /// The teacher giving the lesson.
    pub teacher_id: TeacherId,
    /// The subject being taught.
    pub subject_id: SubjectId,
    /// The class group attending.
    pub class_group_id: ClassGroupId,
    /// The shift the lesson belongs to.
    pub shift_id: ShiftId,
    /// The day of the week.
    pub weekday: Weekday,
    /// Start of the lesson.
    pub start_time: NaiveTime,
    /// End of the lesson.
    pub end_time: NaiveTime,
    /// Room label.
    #[serde(default)]
    pub room: Option<String>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl TimetableEntry {
    /// Returns true if both entries fall on the same day and their time
    /// windows intersect. Touching windows do not overlap.
    pub fn overlaps(&self, other: &TimetableEntry) -> bool {
        self.weekday == other.weekday
            && self.start_time < other.end_time
            && other.start_time < self.end_time
    }
}
