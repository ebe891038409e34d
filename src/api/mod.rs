//! HTTP API module for the timetable engine.
//!
//! This module exposes period generation, candidate filtering and timetable
//! entry validation as REST endpoints over a persistence gateway.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ClassGroupCandidatesRequest, GeneratePeriodsRequest, SubjectCandidatesRequest,
    TeacherCandidatesRequest, TimetableEntryRequest,
};
pub use response::{
    ApiError, ClassGroupCandidatesResponse, GeneratedPeriodsResponse, SubjectCandidatesResponse,
    TeacherCandidatesResponse,
};
pub use state::AppState;
