//! Class period generation.
//!
//! This module expands a shift's start time and a small set of layout
//! parameters into an ordered, contiguous sequence of class periods with at
//! most one inserted break.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GenerationDefaults;
use crate::error::{EngineError, EngineResult};
use crate::models::{ClassPeriod, PeriodKind, ShiftId};

/// Layout parameters for one generation run.
///
/// Only a single break can be inserted per run. Additional breaks and lunch
/// periods are entered manually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodPlan {
    /// Wall-clock time the first lesson starts.
    pub shift_start: NaiveTime,
    /// Number of lessons to emit (N ≥ 1).
    pub lesson_count: u32,
    /// Length of each lesson in minutes (D > 0).
    pub lesson_minutes: u32,
    /// Length of the break in minutes. Zero means no break.
    pub break_minutes: u32,
    /// The lesson after which the break is inserted (K in 1..=N).
    pub break_after_lesson: u32,
    /// Label given to the break period.
    pub break_label: String,
}

impl PeriodPlan {
    /// Builds a plan starting at `shift_start` using configured defaults for
    /// everything else.
    pub fn from_defaults(shift_start: NaiveTime, defaults: &GenerationDefaults) -> Self {
        Self {
            shift_start,
            lesson_count: defaults.lesson_count,
            lesson_minutes: defaults.lesson_minutes,
            break_minutes: defaults.break_minutes,
            break_after_lesson: defaults.break_after_lesson,
            break_label: defaults.break_label.clone(),
        }
    }

    fn check(&self) -> EngineResult<()> {
        if self.lesson_count == 0 {
            return Err(EngineError::invalid_parameter(
                "lesson_count",
                "at least one lesson is required",
            ));
        }
        if self.lesson_minutes == 0 {
            return Err(EngineError::invalid_parameter(
                "lesson_minutes",
                "lesson duration must be positive",
            ));
        }
        if self.break_after_lesson == 0 || self.break_after_lesson > self.lesson_count {
            return Err(EngineError::invalid_parameter(
                "break_after_lesson",
                format!(
                    "must be between 1 and {} (the lesson count), got {}",
                    self.lesson_count, self.break_after_lesson
                ),
            ));
        }
        Ok(())
    }
}

/// Advances the clock by `minutes`, refusing to wrap past midnight.
fn advance(clock: NaiveTime, minutes: u32, parameter: &str) -> EngineResult<NaiveTime> {
    let (next, wrapped) = clock.overflowing_add_signed(Duration::minutes(i64::from(minutes)));
    if wrapped != 0 {
        return Err(EngineError::invalid_parameter(
            parameter,
            format!("periods starting at {} would run past midnight", clock),
        ));
    }
    Ok(next)
}

/// Generates the class periods for a shift.
///
/// A running clock starts at `plan.shift_start`. For each lesson `i` in
/// `1..=lesson_count` a lesson of `lesson_minutes` is emitted with sequence
/// number `i`; right after lesson `break_after_lesson` a break of
/// `break_minutes` is emitted, unless the break length is zero. Because the
/// clock only moves forward, the result is already in chronological order and
/// contiguous: every period ends where the next one starts.
///
/// The periods are drafts (`id == None`); storing them is up to the caller.
///
/// # Errors
///
/// Returns [`EngineError::InvalidParameter`] if the lesson count or lesson
/// length is zero, if `break_after_lesson` is outside `1..=lesson_count`, or
/// if the plan would run past midnight.
///
/// # Examples
///
/// ```
/// use timetable_engine::construction::{generate_periods, PeriodPlan};
/// use timetable_engine::models::{PeriodKind, ShiftId};
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
///
/// let periods = generate_periods(ShiftId(1), &plan).unwrap();
/// assert_eq!(periods.len(), 6);
/// assert_eq!(periods[2].kind, PeriodKind::Break);
/// assert_eq!(periods[2].start_time, NaiveTime::from_hms_opt(9, 40, 0).unwrap());
/// assert_eq!(periods[5].end_time, NaiveTime::from_hms_opt(12, 30, 0).unwrap());
/// ```
pub fn generate_periods(shift_id: ShiftId, plan: &PeriodPlan) -> EngineResult<Vec<ClassPeriod>> {
    plan.check()?;

    let with_break = plan.break_minutes > 0;
    let capacity = plan.lesson_count as usize + usize::from(with_break);
    let mut periods = Vec::with_capacity(capacity);
    let mut clock = plan.shift_start;

    for sequence in 1..=plan.lesson_count {
        let end = advance(clock, plan.lesson_minutes, "lesson_minutes")?;
        periods.push(ClassPeriod {
            id: None,
            shift_id,
            sequence: Some(sequence),
            start_time: clock,
            end_time: end,
            kind: PeriodKind::Lesson,
            label: None,
            active: true,
        });
        clock = end;

        if sequence == plan.break_after_lesson && with_break {
            let end = advance(clock, plan.break_minutes, "break_minutes")?;
            periods.push(ClassPeriod {
                id: None,
                shift_id,
                sequence: None,
                start_time: clock,
                end_time: end,
                kind: PeriodKind::Break,
                label: Some(plan.break_label.clone()),
                active: true,
            });
            clock = end;
        }
    }

    debug!(
        shift_id = %shift_id,
        periods = periods.len(),
        first_start = %plan.shift_start,
        last_end = %clock,
        "Generated class periods"
    );

    Ok(periods)
}

/// Copies a shift's period layout onto another shift.
///
/// The copies are drafts: ids are cleared and the owning shift is replaced.
/// Sequence numbers, times, kinds and labels are kept as they are.
///
/// # Errors
///
/// Returns [`EngineError::InvalidParameter`] if `source` is empty.
pub fn clone_periods(source: &[ClassPeriod], target: ShiftId) -> EngineResult<Vec<ClassPeriod>> {
    if source.is_empty() {
        return Err(EngineError::invalid_parameter(
            "source",
            "the source shift has no class periods to copy",
        ));
    }

    let mut copies: Vec<ClassPeriod> = source
        .iter()
        .map(|period| ClassPeriod {
            id: None,
            shift_id: target,
            ..period.clone()
        })
        .collect();
    copies.sort_by_key(|p| p.start_time);

    Ok(copies)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn plan(lessons: u32, lesson_minutes: u32, break_minutes: u32, after: u32) -> PeriodPlan {
        PeriodPlan {
            shift_start: time("08:00"),
            lesson_count: lessons,
            lesson_minutes,
            break_minutes,
            break_after_lesson: after,
            break_label: "Intervalo".to_string(),
        }
    }

    fn windows(periods: &[ClassPeriod]) -> Vec<(String, String, PeriodKind)> {
        periods
            .iter()
            .map(|p| {
                (
                    p.start_time.format("%H:%M").to_string(),
                    p.end_time.format("%H:%M").to_string(),
                    p.kind,
                )
            })
            .collect()
    }

    /// PG-001: five lessons with a break after the second
    #[test]
    fn test_five_lessons_break_after_second() {
        let periods = generate_periods(ShiftId(1), &plan(5, 50, 20, 2)).unwrap();

        let expected = vec![
            ("08:00", "08:50", PeriodKind::Lesson),
            ("08:50", "09:40", PeriodKind::Lesson),
            ("09:40", "10:00", PeriodKind::Break),
            ("10:00", "10:50", PeriodKind::Lesson),
            ("10:50", "11:40", PeriodKind::Lesson),
            ("11:40", "12:30", PeriodKind::Lesson),
        ];
        let expected: Vec<_> = expected
            .into_iter()
            .map(|(s, e, k)| (s.to_string(), e.to_string(), k))
            .collect();
        assert_eq!(windows(&periods), expected);

        assert_eq!(periods[2].label.as_deref(), Some("Intervalo"));
        assert_eq!(periods[2].sequence, None);
        let sequences: Vec<_> = periods.iter().filter_map(|p| p.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3, 4, 5]);
    }

    /// PG-002: zero-length break is not emitted
    #[test]
    fn test_zero_break_emits_only_lessons() {
        let periods = generate_periods(ShiftId(1), &plan(4, 45, 0, 2)).unwrap();

        assert_eq!(periods.len(), 4);
        assert!(periods.iter().all(|p| p.kind == PeriodKind::Lesson));
        assert_eq!(periods[3].end_time, time("11:00"));
    }

    /// PG-003: break after the last lesson closes the shift
    #[test]
    fn test_break_after_last_lesson() {
        let periods = generate_periods(ShiftId(1), &plan(3, 50, 15, 3)).unwrap();

        assert_eq!(periods.len(), 4);
        assert_eq!(periods[3].kind, PeriodKind::Break);
        assert_eq!(periods[3].start_time, time("10:30"));
        assert_eq!(periods[3].end_time, time("10:45"));
    }

    /// PG-004: break index beyond the lesson count
    #[test]
    fn test_break_after_beyond_lesson_count_is_rejected() {
        let result = generate_periods(ShiftId(1), &plan(5, 50, 20, 6));

        match result {
            Err(EngineError::InvalidParameter { parameter, .. }) => {
                assert_eq!(parameter, "break_after_lesson");
            }
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_break_after_zero_is_rejected() {
        assert!(matches!(
            generate_periods(ShiftId(1), &plan(5, 50, 20, 0)),
            Err(EngineError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_break_index_checked_even_without_break() {
        assert!(matches!(
            generate_periods(ShiftId(1), &plan(2, 50, 0, 3)),
            Err(EngineError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_zero_lessons_is_rejected() {
        match generate_periods(ShiftId(1), &plan(0, 50, 20, 1)) {
            Err(EngineError::InvalidParameter { parameter, .. }) => {
                assert_eq!(parameter, "lesson_count")
            }
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_lesson_minutes_is_rejected() {
        match generate_periods(ShiftId(1), &plan(3, 0, 20, 1)) {
            Err(EngineError::InvalidParameter { parameter, .. }) => {
                assert_eq!(parameter, "lesson_minutes")
            }
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_plan_running_past_midnight_is_rejected() {
        let mut late = plan(3, 50, 10, 1);
        late.shift_start = time("22:30");

        assert!(matches!(
            generate_periods(ShiftId(1), &late),
            Err(EngineError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_plan_ending_exactly_before_midnight() {
        let mut late = plan(2, 30, 0, 1);
        late.shift_start = time("22:59");

        let periods = generate_periods(ShiftId(1), &late).unwrap();
        assert_eq!(periods[1].end_time, time("23:59"));
    }

    #[test]
    fn test_generated_periods_belong_to_shift_and_are_drafts() {
        let periods = generate_periods(ShiftId(9), &plan(3, 50, 20, 1)).unwrap();

        assert!(periods.iter().all(|p| p.shift_id == ShiftId(9)));
        assert!(periods.iter().all(|p| p.id.is_none() && p.active));
    }

    #[test]
    fn test_from_defaults_uses_configured_values() {
        let defaults = GenerationDefaults::default();
        let plan = PeriodPlan::from_defaults(time("13:00"), &defaults);

        assert_eq!(plan.shift_start, time("13:00"));
        assert_eq!(plan.lesson_count, defaults.lesson_count);
        assert_eq!(plan.break_label, defaults.break_label);
    }

    #[test]
    fn test_clone_periods_retargets_shift() {
        let mut source = generate_periods(ShiftId(1), &plan(3, 50, 20, 1)).unwrap();
        for (i, period) in source.iter_mut().enumerate() {
            period.id = Some(crate::models::ClassPeriodId(i as u32 + 1));
        }

        let copies = clone_periods(&source, ShiftId(2)).unwrap();

        assert_eq!(copies.len(), source.len());
        assert!(copies.iter().all(|p| p.shift_id == ShiftId(2) && p.id.is_none()));
        assert!(copies.iter().zip(&source).all(|(c, s)| c.same_window(s)));
    }

    #[test]
    fn test_clone_periods_orders_by_start_time() {
        let mut source = generate_periods(ShiftId(1), &plan(3, 50, 0, 1)).unwrap();
        source.reverse();

        let copies = clone_periods(&source, ShiftId(2)).unwrap();
        assert_eq!(copies[0].sequence, Some(1));
        assert_eq!(copies[2].sequence, Some(3));
    }

    #[test]
    fn test_clone_empty_source_is_rejected() {
        assert!(matches!(
            clone_periods(&[], ShiftId(2)),
            Err(EngineError::InvalidParameter { .. })
        ));
    }
}
