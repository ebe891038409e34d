//! Request types for the timetable engine API.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::config::GenerationDefaults;
use crate::construction::PeriodPlan;
use crate::models::{
    ClassGroupId, ClassPeriod, ClassPeriodId, ProposedTimetableEntry, ShiftId, SubjectId,
    TeacherId, Weekday,
};

/// Request body for `POST /periods/generate`.
///
/// Every layout field is optional; missing ones come from the configured
/// generation defaults, and a missing start time from the shift itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratePeriodsRequest {
    /// The shift to generate periods for.
    pub shift_id: ShiftId,
    /// Start of the first lesson.
    #[serde(default)]
    pub shift_start: Option<NaiveTime>,
    /// Number of lessons.
    #[serde(default)]
    pub lesson_count: Option<u32>,
    /// Lesson length in minutes.
    #[serde(default)]
    pub lesson_minutes: Option<u32>,
    /// Break length in minutes.
    #[serde(default)]
    pub break_minutes: Option<u32>,
    /// The lesson after which the break goes.
    #[serde(default)]
    pub break_after_lesson: Option<u32>,
    /// Break label.
    #[serde(default)]
    pub break_label: Option<String>,
}

impl GeneratePeriodsRequest {
    /// Resolves the request into a full plan.
    pub fn into_plan(self, shift_start: NaiveTime, defaults: &GenerationDefaults) -> PeriodPlan {
        let base = PeriodPlan::from_defaults(self.shift_start.unwrap_or(shift_start), defaults);
        PeriodPlan {
            lesson_count: self.lesson_count.unwrap_or(base.lesson_count),
            lesson_minutes: self.lesson_minutes.unwrap_or(base.lesson_minutes),
            break_minutes: self.break_minutes.unwrap_or(base.break_minutes),
            break_after_lesson: self.break_after_lesson.unwrap_or(base.break_after_lesson),
            break_label: self.break_label.unwrap_or(base.break_label),
            shift_start: base.shift_start,
        }
    }
}

/// Request body for `POST /candidates/teachers`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeacherCandidatesRequest {
    /// The selected subject, if any.
    #[serde(default)]
    pub subject_id: Option<SubjectId>,
}

/// Request body for `POST /candidates/subjects`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectCandidatesRequest {
    /// The selected teacher, if any.
    #[serde(default)]
    pub teacher_id: Option<TeacherId>,
    /// The selected class group, if any.
    #[serde(default)]
    pub class_group_id: Option<ClassGroupId>,
}

/// Request body for `POST /candidates/class-groups`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassGroupCandidatesRequest {
    /// The selected shift, if any.
    #[serde(default)]
    pub shift_id: Option<ShiftId>,
    /// The selected teacher, if any.
    #[serde(default)]
    pub teacher_id: Option<TeacherId>,
    /// The selected subject, if any.
    #[serde(default)]
    pub subject_id: Option<SubjectId>,
}

/// Request body for `POST /timetable` and `POST /timetable/validate`.
///
/// The period is referenced by id and resolved against the shift's stored
/// periods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableEntryRequest {
    /// The teacher.
    pub teacher_id: TeacherId,
    /// The subject.
    pub subject_id: SubjectId,
    /// The class group.
    pub class_group_id: ClassGroupId,
    /// The shift.
    pub shift_id: ShiftId,
    /// The day of the week.
    pub weekday: Weekday,
    /// The selected period.
    #[serde(default)]
    pub period_id: Option<ClassPeriodId>,
    /// Room label.
    #[serde(default)]
    pub room: Option<String>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl TimetableEntryRequest {
    /// Builds the proposal, looking the period id up in `periods`. An id that
    /// is not found counts as no selection.
    pub fn into_proposal(self, periods: &[ClassPeriod]) -> ProposedTimetableEntry {
        let period = self
            .period_id
            .and_then(|id| periods.iter().find(|p| p.id == Some(id)).cloned());

        ProposedTimetableEntry {
            teacher_id: self.teacher_id,
            subject_id: self.subject_id,
            class_group_id: self.class_group_id,
            shift_id: self.shift_id,
            weekday: self.weekday,
            period,
            room: self.room,
            notes: self.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    #[test]
    fn test_into_plan_fills_missing_fields_from_defaults() {
        let request: GeneratePeriodsRequest =
            serde_json::from_str(r#"{"shift_id": 1, "break_after_lesson": 2}"#).unwrap();
        let plan = request.into_plan(time("07:00"), &GenerationDefaults::default());

        assert_eq!(plan.shift_start, time("07:00"));
        assert_eq!(plan.lesson_count, 5);
        assert_eq!(plan.break_after_lesson, 2);
        assert_eq!(plan.break_label, "Intervalo");
    }

    #[test]
    fn test_into_plan_prefers_explicit_start() {
        let request = GeneratePeriodsRequest {
            shift_id: ShiftId(1),
            shift_start: Some(time("07:30")),
            ..Default::default()
        };
        let plan = request.into_plan(time("07:00"), &GenerationDefaults::default());
        assert_eq!(plan.shift_start, time("07:30"));
    }

    #[test]
    fn test_unknown_period_id_becomes_no_selection() {
        let request: TimetableEntryRequest = serde_json::from_str(
            r#"{
                "teacher_id": 1,
                "subject_id": 7,
                "class_group_id": 3,
                "shift_id": 1,
                "weekday": "mon",
                "period_id": 42
            }"#,
        )
        .unwrap();

        let proposal = request.into_proposal(&[]);
        assert!(proposal.period.is_none());
    }
}
