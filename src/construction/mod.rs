//! The Timetable Construction Engine.
//!
//! This module contains the pure parts of timetable construction: expanding a
//! shift into class periods, narrowing the candidate lists shown while an
//! entry is being composed, and validating a proposed entry against the link
//! registry. Nothing in here touches storage; callers pass already-fetched
//! periods and links as plain data.

mod candidate_filter;
mod link_registry;
mod period_generator;
mod timetable_validator;

pub use candidate_filter::{
    filter_class_groups, filter_subjects, filter_teachers, selectable_periods,
    sole_teacher_for_subject,
};
pub use link_registry::LinkRegistry;
pub use period_generator::{PeriodPlan, clone_periods, generate_periods};
pub use timetable_validator::validate_entry;
