//! Response types for the payroll engine API.
//!
//! This module defines the error response structures and the mapping from
//! [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

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

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
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
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            EngineError::InvalidPeriod { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_PERIOD",
                    message,
                    "The period must name a calendar month as { year, month }",
                ),
            },
            EngineError::InvalidCoordinate { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_COORDINATE",
                    message,
                    "Latitude must be within -90..90 and longitude within -180..180",
                ),
            },
            EngineError::InvalidAttendance { .. } | EngineError::InvalidTransition { .. } => {
                ApiErrorResponse {
                    status: StatusCode::BAD_REQUEST,
                    error: ApiError::validation_error(message),
                }
            }
            EngineError::GeofenceNotFound { name } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "GEOFENCE_NOT_FOUND",
                    message,
                    format!("No geofence named '{}' is configured", name),
                ),
            },
            EngineError::OutsideGeofence {
                distance_meters,
                radius_meters,
                ..
            } => ApiErrorResponse {
                status: StatusCode::FORBIDDEN,
                error: ApiError::with_details(
                    "OUTSIDE_GEOFENCE",
                    message,
                    format!(
                        "distance_meters={:.1} radius_meters={}",
                        distance_meters, radius_meters
                    ),
                ),
            },
            EngineError::AmountOverflow { .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "AMOUNT_OVERFLOW",
                    message,
                    "Salary, rate or claim amounts are too large to total",
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_invalid_period_maps_to_400() {
        let api_error: ApiErrorResponse = EngineError::InvalidPeriod {
            year: 2025,
            month: 0,
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_PERIOD");
    }

    #[test]
    fn test_outside_geofence_maps_to_403() {
        let api_error: ApiErrorResponse = EngineError::OutsideGeofence {
            geofence: "check_in".to_string(),
            distance_meters: 893_412.7,
            radius_meters: 100.0,
        }
        .into();
        assert_eq!(api_error.status, StatusCode::FORBIDDEN);
        assert_eq!(api_error.error.code, "OUTSIDE_GEOFENCE");
        assert!(api_error.error.message.contains("check_in"));
    }

    #[test]
    fn test_unknown_geofence_maps_to_404() {
        let api_error: ApiErrorResponse = EngineError::GeofenceNotFound {
            name: "warehouse".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "GEOFENCE_NOT_FOUND");
    }

    #[test]
    fn test_transition_maps_to_validation_error() {
        let api_error: ApiErrorResponse = EngineError::InvalidTransition {
            request_id: "req_1".to_string(),
            from: "approved".to_string(),
            to: "rejected".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "VALIDATION_ERROR");
    }

    #[test]
    fn test_amount_overflow_maps_to_422() {
        let api_error: ApiErrorResponse =
            EngineError::amount_overflow("emp_001", "net pay").into();
        assert_eq!(api_error.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api_error.error.code, "AMOUNT_OVERFLOW");
        assert!(api_error.error.message.contains("emp_001"));
    }

    #[test]
    fn test_config_errors_map_to_500() {
        let api_error: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "/etc/payroll.yaml".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }
}
