//! Core data models for the Timetable Construction Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod catalog;
mod class_period;
mod ids;
mod links;
mod shift;
mod timetable_entry;

pub use catalog::{ClassGroup, Subject, Teacher};
pub use class_period::{ClassPeriod, PeriodKind};
pub use ids::{ClassGroupId, ClassPeriodId, ShiftId, SubjectId, TeacherId, TimetableEntryId};
pub use links::{ClassSubjectLink, TeacherSubjectLink};
pub use shift::Shift;
pub use timetable_entry::{ProposedTimetableEntry, TimetableEntry, Weekday};
