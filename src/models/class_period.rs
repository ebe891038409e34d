//! Class period model.
//!
//! A class period is one lesson, break or lunch slot within a shift.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::{ClassPeriodId, ShiftId};

/// The kind of a class period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PeriodKind {
    /// A teaching period. Only lessons carry a sequence number and only
    /// lessons can hold timetable entries.
    Lesson,
    /// A recess between lessons.
    Break,
    /// A lunch period. Never produced by the generator.
    Lunch,
}

impl std::fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PeriodKind::Lesson => write!(f, "LESSON"),
            PeriodKind::Break => write!(f, "BREAK"),
            PeriodKind::Lunch => write!(f, "LUNCH"),
        }
    }
}

fn default_active() -> bool {
    true
}

/// A slot within a shift.
///
/// Periods produced by the generator are drafts: `id` stays `None` until the
/// persistence gateway stores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassPeriod {
    /// Identifier assigned by the store, `None` for drafts.
    #[serde(default)]
    pub id: Option<ClassPeriodId>,
    /// The shift this period belongs to.
    pub shift_id: ShiftId,
    /// 1-based lesson number. `None` for breaks and lunches.
    #[serde(default)]
    pub sequence: Option<u32>,
    /// Start of the period.
    pub start_time: NaiveTime,
    /// End of the period.
    pub end_time: NaiveTime,
    /// Lesson, break or lunch.
    pub kind: PeriodKind,
    /// Optional label, e.g. "Intervalo".
    #[serde(default)]
    pub label: Option<String>,
    /// Whether the period is currently offered.
    #[serde(default = "default_active")]
    pub active: bool,
}

impl ClassPeriod {
    /// Returns true if this is a lesson period.
    pub fn is_lesson(&self) -> bool {
        self.kind == PeriodKind::Lesson
    }

    /// Returns true if both periods occupy the same time window.
    pub fn same_window(&self, other: &ClassPeriod) -> bool {
        self.start_time == other.start_time && self.end_time == other.end_time
    }
}
