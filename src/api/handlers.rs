//! HTTP request handlers for the timetable engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::construction::{
    filter_class_groups, filter_subjects, filter_teachers, selectable_periods,
    sole_teacher_for_subject, validate_entry,
};
use crate::error::{EngineError, EngineResult};
use crate::gateway::{
    TimetableQuery, find_shift, generate_for_shift, remove_entry, schedule_entry_with_periods,
};
use crate::models::{ClassPeriod, ShiftId, TimetableEntry, TimetableEntryId};

use super::request::{
    ClassGroupCandidatesRequest, GeneratePeriodsRequest, SubjectCandidatesRequest,
    TeacherCandidatesRequest, TimetableEntryRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, ClassGroupCandidatesResponse, GeneratedPeriodsResponse,
    SubjectCandidatesResponse, TeacherCandidatesResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/periods/generate", post(generate_periods_handler))
        .route("/shifts/:shift_id/periods", get(shift_periods_handler))
        .route("/candidates/teachers", post(teacher_candidates_handler))
        .route("/candidates/subjects", post(subject_candidates_handler))
        .route("/candidates/class-groups", post(class_group_candidates_handler))
        .route("/timetable/validate", post(validate_entry_handler))
        .route(
            "/timetable",
            post(create_entry_handler).get(list_entries_handler),
        )
        .route("/timetable/:entry_id", delete(delete_entry_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Turns an engine result into a response, logging failures against the
/// request's correlation id.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    status: StatusCode,
    result: EngineResult<T>,
) -> Response {
    match result {
        Ok(body) => json_response(status, body),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Request failed"
            );
            let api_error: ApiErrorResponse = err.into();
            json_response(api_error.status, api_error.error)
        }
    }
}

/// Unwraps a JSON body, or builds the 400 response for a rejected one.
fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(json_response(StatusCode::BAD_REQUEST, error))
}

/// Handler for POST /periods/generate.
///
/// Generates the period layout of a shift, persists it and returns the
/// stored periods.
async fn generate_periods_handler(
    State(state): State<AppState>,
    payload: Result<Json<GeneratePeriodsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing period generation request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let started = Instant::now();
    let shift_id = request.shift_id;
    let result = find_shift(state.gateway(), shift_id).and_then(|shift| {
        let plan = request.into_plan(shift.start_time, state.config().generation());
        generate_for_shift(state.gateway(), &shift, &plan)
    });

    if let Ok(periods) = &result {
        info!(
            correlation_id = %correlation_id,
            shift_id = %shift_id,
            periods = periods.len(),
            duration_us = started.elapsed().as_micros(),
            "Period generation completed"
        );
    }

    respond(
        correlation_id,
        StatusCode::CREATED,
        result.map(|periods| GeneratedPeriodsResponse { shift_id, periods }),
    )
}

/// Handler for GET /shifts/:shift_id/periods.
///
/// Lists the lesson periods an entry of this shift can be placed in.
async fn shift_periods_handler(
    State(state): State<AppState>,
    Path(shift_id): Path<u32>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let shift_id = ShiftId(shift_id);

    let result = find_shift(state.gateway(), shift_id).and_then(|shift| {
        let periods = state.gateway().list_class_periods(shift.id)?;
        let selectable: Vec<ClassPeriod> = selectable_periods(shift.id, &periods)
            .into_iter()
            .cloned()
            .collect();
        Ok(GeneratedPeriodsResponse {
            shift_id: shift.id,
            periods: selectable,
        })
    });

    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /candidates/teachers.
async fn teacher_candidates_handler(
    State(state): State<AppState>,
    payload: Result<Json<TeacherCandidatesRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let result = (|| -> EngineResult<TeacherCandidatesResponse> {
        let gateway = state.gateway();
        let teachers = gateway.list_teachers()?;
        let links = gateway.list_teacher_links()?;

        Ok(TeacherCandidatesResponse {
            teachers: filter_teachers(request.subject_id, &teachers, &links)
                .into_iter()
                .cloned()
                .collect(),
            suggested_teacher_id: request
                .subject_id
                .and_then(|subject| sole_teacher_for_subject(subject, &links)),
        })
    })();

    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /candidates/subjects.
async fn subject_candidates_handler(
    State(state): State<AppState>,
    payload: Result<Json<SubjectCandidatesRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let result = (|| -> EngineResult<SubjectCandidatesResponse> {
        let gateway = state.gateway();
        let subjects = gateway.list_subjects()?;
        let teacher_links = gateway.list_teacher_links()?;
        let class_links = gateway.list_class_links()?;

        let subjects = filter_subjects(
            request.teacher_id,
            request.class_group_id,
            &subjects,
            &teacher_links,
            &class_links,
        )
        .into_iter()
        .cloned()
        .collect();
        Ok(SubjectCandidatesResponse { subjects })
    })();

    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /candidates/class-groups.
async fn class_group_candidates_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClassGroupCandidatesRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let result = (|| -> EngineResult<ClassGroupCandidatesResponse> {
        let gateway = state.gateway();
        let class_groups = gateway.list_class_groups()?;
        let teacher_links = gateway.list_teacher_links()?;
        let class_links = gateway.list_class_links()?;

        let class_groups = filter_class_groups(
            request.shift_id,
            request.teacher_id,
            request.subject_id,
            &class_groups,
            &teacher_links,
            &class_links,
        )
        .into_iter()
        .cloned()
        .collect();
        Ok(ClassGroupCandidatesResponse { class_groups })
    })();

    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /timetable/validate.
///
/// Runs the entry checks without storing anything. Returns the entry that
/// would be stored.
async fn validate_entry_handler(
    State(state): State<AppState>,
    payload: Result<Json<TimetableEntryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing timetable validation request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let result = (|| -> EngineResult<TimetableEntry> {
        let gateway = state.gateway();
        let periods = gateway.list_class_periods(request.shift_id)?;
        let teacher_links = gateway.list_teacher_links()?;
        let class_links = gateway.list_class_links()?;

        let proposal = request.into_proposal(&periods);
        Ok(validate_entry(
            &proposal,
            &periods,
            &teacher_links,
            &class_links,
        )?)
    })();

    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /timetable.
///
/// Validates the entry and, if it passes, stores it.
async fn create_entry_handler(
    State(state): State<AppState>,
    payload: Result<Json<TimetableEntryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing timetable entry request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let result = state
        .gateway()
        .list_class_periods(request.shift_id)
        .map_err(EngineError::from)
        .and_then(|periods| {
            let proposal = request.into_proposal(&periods);
            schedule_entry_with_periods(state.gateway(), &proposal, &periods)
        });

    if let Ok(entry) = &result {
        info!(
            correlation_id = %correlation_id,
            entry_id = ?entry.id,
            "Timetable entry created"
        );
    }

    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for GET /timetable.
async fn list_entries_handler(
    State(state): State<AppState>,
    Query(query): Query<TimetableQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = state
        .gateway()
        .list_timetable_entries(&query)
        .map_err(EngineError::from);

    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for DELETE /timetable/:entry_id.
async fn delete_entry_handler(
    State(state): State<AppState>,
    Path(entry_id): Path<u32>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let entry_id = TimetableEntryId(entry_id);

    match remove_entry(state.gateway(), entry_id) {
        Ok(_) => {
            info!(
                correlation_id = %correlation_id,
                entry_id = %entry_id,
                "Timetable entry deleted"
            );
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => respond::<()>(correlation_id, StatusCode::OK, Err(err)),
    }
}
