//! Shift model.
//!
//! A shift is a named daily time window (e.g. morning) that owns a sequence
//! of class periods.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::ShiftId;

fn default_active() -> bool {
    true
}

/// Represents a named daily time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: ShiftId,
    /// The display name of the shift (e.g. "Matutino").
    pub name: String,
    /// Nominal start of the shift.
    pub start_time: NaiveTime,
    /// Nominal end of the shift.
    pub end_time: NaiveTime,
    /// Whether the shift is currently in use.
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Shift {
    /// Returns true if the window `start..end` lies inside the shift's
    /// nominal window.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetable_engine::models::{Shift, ShiftId};
    /// use chrono::NaiveTime;
    ///
    /// let shift = Shift {
    ///     id: ShiftId(1),
    ///     name: "Matutino".to_string(),
    ///     start_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
    ///     active: true,
    /// };
    /// let eight = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
    /// let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
    /// let one_pm = NaiveTime::from_hms_opt(13, 0, 0).unwrap();
    /// assert!(shift.covers(eight, nine));
    /// assert!(!shift.covers(eight, one_pm));
    /// ```
    pub fn covers(&self, start: NaiveTime, end: NaiveTime) -> bool {
        start >= self.start_time && end <= self.end_time
    }
}
