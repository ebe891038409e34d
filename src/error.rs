//! Error types for the Timetable Construction Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Validation failures are kept in their own [`ValidationError`] type so that
//! callers can render them to the user verbatim, while [`EngineError`] covers
//! everything an engine operation can return.

use chrono::NaiveTime;
use thiserror::Error;

use crate::models::{ClassGroupId, PeriodKind, ShiftId, SubjectId, TeacherId, TimetableEntryId};

/// Reasons a proposed timetable entry was rejected by the validator.
///
/// The variants are ordered the way the validator checks them: the first
/// failing check is the one reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No class period was selected for the entry.
    #[error("A class period must be selected")]
    MissingPeriod,

    /// The selected period is a break or lunch, not a lesson.
    #[error("Selected period {start}-{end} is a {kind} period, not a lesson")]
    NotALessonPeriod {
        /// The kind of the selected period.
        kind: PeriodKind,
        /// Start of the selected period.
        start: NaiveTime,
        /// End of the selected period.
        end: NaiveTime,
    },

    /// The selected period does not match any lesson of the entry's shift.
    #[error("Period {start}-{end} is not a lesson of shift {shift_id}")]
    PeriodNotInShift {
        /// The shift the entry refers to.
        shift_id: ShiftId,
        /// Start of the selected period.
        start: NaiveTime,
        /// End of the selected period.
        end: NaiveTime,
    },

    /// The teacher is not linked to the subject.
    #[error("Teacher {teacher_id} is not linked to subject {subject_id}")]
    TeacherNotLinkedToSubject {
        /// The selected teacher.
        teacher_id: TeacherId,
        /// The selected subject.
        subject_id: SubjectId,
    },

    /// The subject is not part of the class group's curriculum.
    #[error("Subject {subject_id} is not linked to class group {class_group_id}")]
    SubjectNotLinkedToClassGroup {
        /// The selected class group.
        class_group_id: ClassGroupId,
        /// The selected subject.
        subject_id: SubjectId,
    },
}

impl ValidationError {
    /// Returns a stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingPeriod => "MISSING_PERIOD",
            ValidationError::NotALessonPeriod { .. } => "NOT_A_LESSON_PERIOD",
            ValidationError::PeriodNotInShift { .. } => "PERIOD_NOT_IN_SHIFT",
            ValidationError::TeacherNotLinkedToSubject { .. } => "TEACHER_NOT_LINKED_TO_SUBJECT",
            ValidationError::SubjectNotLinkedToClassGroup { .. } => {
                "SUBJECT_NOT_LINKED_TO_CLASS_GROUP"
            }
        }
    }
}

/// An opaque failure reported by the persistence gateway.
///
/// The engine never interprets these; they are carried back to the caller
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PersistenceError {
    message: String,
}

impl PersistenceError {
    /// Creates a persistence error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the message reported by the store.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The main error type for the Timetable Construction Engine.
///
/// # Example
///
/// ```
/// use timetable_engine::error::EngineError;
///
/// let error = EngineError::InvalidParameter {
///     parameter: "lesson_count".to_string(),
///     message: "must be at least 1".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid parameter 'lesson_count': must be at least 1");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A generation parameter was out of range.
    #[error("Invalid parameter '{parameter}': {message}")]
    InvalidParameter {
        /// The name of the offending parameter.
        parameter: String,
        /// A description of why it was rejected.
        message: String,
    },

    /// The referenced shift does not exist.
    #[error("Shift not found: {shift_id}")]
    ShiftNotFound {
        /// The shift that was looked up.
        shift_id: ShiftId,
    },

    /// The referenced timetable entry does not exist.
    #[error("Timetable entry not found: {entry_id}")]
    EntryNotFound {
        /// The entry that was looked up.
        entry_id: TimetableEntryId,
    },

    /// A proposed timetable entry failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The persistence gateway reported a failure.
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    pub(crate) fn invalid_parameter(parameter: &str, message: impl Into<String>) -> Self {
        EngineError::InvalidParameter {
            parameter: parameter.to_string(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
