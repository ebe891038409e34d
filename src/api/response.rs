//! Response types for the timetable engine API.
//!
//! This module defines the success payloads, the error response structure
//! and the mapping from engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{ClassGroup, ClassPeriod, ShiftId, Subject, Teacher, TeacherId};

/// Response body for period generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPeriodsResponse {
    /// The shift the periods belong to.
    pub shift_id: ShiftId,
    /// The stored periods, in chronological order.
    pub periods: Vec<ClassPeriod>,
}

/// Response body for teacher candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherCandidatesResponse {
    /// Teachers to offer.
    pub teachers: Vec<Teacher>,
    /// The only teacher linked to the selected subject, for pre-selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_teacher_id: Option<TeacherId>,
}

/// Response body for subject candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectCandidatesResponse {
    /// Subjects to offer.
    pub subjects: Vec<Subject>,
}

/// Response body for class group candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassGroupCandidatesResponse {
    /// Class groups to offer.
    pub class_groups: Vec<ClassGroup>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidParameter { parameter, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_PARAMETER",
                    format!("Invalid parameter '{}': {}", parameter, message),
                    parameter,
                ),
            },
            EngineError::ShiftNotFound { shift_id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("SHIFT_NOT_FOUND", format!("Shift not found: {}", shift_id)),
            },
            EngineError::EntryNotFound { entry_id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new(
                    "ENTRY_NOT_FOUND",
                    format!("Timetable entry not found: {}", entry_id),
                ),
            },
            EngineError::Validation(err) => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::new(err.code(), err.to_string()),
            },
            EngineError::Persistence(err) => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "PERSISTENCE_ERROR",
                    "The store rejected the request",
                    err.message(),
                ),
            },
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
        }
    }
}
