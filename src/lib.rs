//! Timetable construction engine for schools.
//!
//! This crate generates the class periods of a shift, narrows the teachers,
//! subjects and class groups offered while an entry is being built, and
//! validates a proposed timetable entry against the teacher-subject and
//! class-subject links before it is stored.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod construction;
pub mod error;
pub mod gateway;
pub mod models;
