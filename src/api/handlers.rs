//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{run_payroll, verify_geofence};
use crate::error::EngineError;
use crate::export::payroll_to_csv;
use crate::models::{PayPeriod, PayrollRunResult};

use super::request::{GeofenceVerifyRequest, PayrollRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll", post(payroll_handler))
        .route("/payroll/csv", post(payroll_csv_handler))
        .route("/geofence/:name/verify", post(geofence_verify_handler))
        .with_state(state)
}

/// Handler for POST /payroll.
///
/// Runs payroll for the posted employees and returns the full run result.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match perform_run(&state, request) {
        Ok(run) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %run.run_id,
                period = %run.period,
                employees = run.totals.employee_count,
                net_pay_total = %run.totals.net_pay_total,
                duration_us = run.audit_trace.duration_us,
                "Payroll run succeeded"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(run),
            )
                .into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /payroll/csv.
///
/// Runs payroll exactly like `/payroll` and returns the line items as CSV.
async fn payroll_csv_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll export request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match perform_run(&state, request) {
        Ok(run) => {
            let csv = payroll_to_csv(&run.line_items);
            info!(
                correlation_id = %correlation_id,
                run_id = %run.run_id,
                rows = run.line_items.len(),
                "Payroll export succeeded"
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"payroll-{}.csv\"", run.period),
                    ),
                ],
                csv,
            )
                .into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /geofence/:name/verify.
///
/// Accepts the position if it lies inside the named geofence; otherwise
/// responds `403 OUTSIDE_GEOFENCE`.
async fn geofence_verify_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<GeofenceVerifyRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, geofence = %name, "Processing geofence check");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let result = state
        .config()
        .geofence(&name)
        .and_then(|fence| verify_geofence(&name, fence, request.into()));

    match result {
        Ok(check) => {
            info!(
                correlation_id = %correlation_id,
                geofence = %check.geofence,
                distance_meters = check.distance_meters,
                "Position accepted"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(check),
            )
                .into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}

fn perform_run(state: &AppState, request: PayrollRequest) -> Result<PayrollRunResult, EngineError> {
    let period: PayPeriod = request.period.try_into()?;
    run_payroll(
        &period,
        &request.employees,
        &request.attendance,
        &request.requests,
        state.config().payroll(),
    )
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
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
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::request::PayPeriodRequest;
    use crate::calculation::GeofenceCheck;
    use crate::config::ConfigLoader;
    use crate::models::{AttendanceRecord, EmploymentProfile, EmploymentType};
    use axum::body::Body;
    use axum::http::Request;
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/payroll.yaml").expect("Failed to load config");
        AppState::new(config)
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_valid_request() -> PayrollRequest {
        PayrollRequest {
            period: PayPeriodRequest {
                year: 2025,
                month: 3,
            },
            employees: vec![EmploymentProfile {
                employee_id: "emp_002".to_string(),
                name: "Sari Wulandari".to_string(),
                employment_type: EmploymentType::PartTime,
                base_salary: None,
                hourly_rate: Some(dec("50000")),
            }],
            attendance: vec![AttendanceRecord {
                employee_id: "emp_002".to_string(),
                date: make_date("2025-03-03"),
                check_in: Some(make_datetime("2025-03-03", "08:00:00")),
                check_out: Some(make_datetime("2025-03-03", "17:00:00")),
                total_minutes: 540,
            }],
            requests: vec![],
        }
    }

    fn post_json(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_payroll_valid_request_returns_200() {
        let router = create_router(create_test_state());
        let body = serde_json::to_string(&create_valid_request()).unwrap();

        let response = router.oneshot(post_json("/payroll", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let result: PayrollRunResult = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.line_items.len(), 1);
        assert_eq!(result.line_items[0].base_salary, dec("450000"));
        assert_eq!(result.line_items[0].total_attendance_hours, dec("9"));
    }

    #[tokio::test]
    async fn test_payroll_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/payroll", "{invalid json".to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_payroll_missing_employees_returns_validation_error() {
        let router = create_router(create_test_state());
        let body = r#"{ "period": { "year": 2025, "month": 3 } }"#.to_string();

        let response = router.oneshot(post_json("/payroll", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("employees"));
    }

    #[tokio::test]
    async fn test_payroll_invalid_month_returns_400() {
        let router = create_router(create_test_state());
        let mut request = create_valid_request();
        request.period.month = 13;
        let body = serde_json::to_string(&request).unwrap();

        let response = router.oneshot(post_json("/payroll", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_PERIOD");
    }

    #[tokio::test]
    async fn test_payroll_amount_overflow_returns_422() {
        let router = create_router(create_test_state());
        let mut request = create_valid_request();
        request.employees[0].hourly_rate = Some(dec("10000000000000000000000000000"));
        let body = serde_json::to_string(&request).unwrap();

        let response = router.oneshot(post_json("/payroll", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "AMOUNT_OVERFLOW");
        assert!(error.message.contains("emp_002"));
    }

    #[tokio::test]
    async fn test_payroll_csv_returns_text_csv() {
        let router = create_router(create_test_state());
        let body = serde_json::to_string(&create_valid_request()).unwrap();

        let response = router
            .oneshot(post_json("/payroll/csv", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            response.headers().get("content-disposition").unwrap(),
            "attachment; filename=\"payroll-2025-03.csv\""
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let csv = String::from_utf8(body.to_vec()).unwrap();
        assert_eq!(
            csv,
            "Employee ID,Name,Type,Base Salary,Work Hours,Claims,Net Pay\n\
             emp_002,Sari Wulandari,part_time,450000,9,0,450000"
        );
    }

    #[tokio::test]
    async fn test_geofence_accepts_position_at_office() {
        let router = create_router(create_test_state());
        let body = r#"{ "latitude": -6.2088, "longitude": 106.8456 }"#.to_string();

        let response = router
            .oneshot(post_json("/geofence/check_in/verify", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let check: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(check["allowed"], true);
        assert_eq!(check["geofence"], "check_in");
        assert_eq!(check["radius_meters"], 100.0);
        assert_eq!(check["distance_meters"], 0.0);
    }

    #[tokio::test]
    async fn test_geofence_rejects_check_in_from_singapore() {
        let router = create_router(create_test_state());
        let body = r#"{ "latitude": 1.3521, "longitude": 103.8198 }"#.to_string();

        let response = router
            .oneshot(post_json("/geofence/check_in/verify", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "OUTSIDE_GEOFENCE");
    }

    #[tokio::test]
    async fn test_geofence_unknown_name_returns_404() {
        let router = create_router(create_test_state());
        let body = r#"{ "latitude": -6.2088, "longitude": 106.8456 }"#.to_string();

        let response = router
            .oneshot(post_json("/geofence/warehouse/verify", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_geofence_out_of_range_coordinate_returns_400() {
        let router = create_router(create_test_state());
        let body = r#"{ "latitude": 123.0, "longitude": 106.8456 }"#.to_string();

        let response = router
            .oneshot(post_json("/geofence/check_in/verify", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_COORDINATE");
    }

    #[test]
    fn test_geofence_check_serializes_expected_keys() {
        let check = GeofenceCheck {
            geofence: "office_presence".to_string(),
            allowed: true,
            distance_meters: 12.5,
            radius_meters: 500.0,
        };
        let json = serde_json::to_value(&check).unwrap();
        for key in ["allowed", "distance_meters", "radius_meters", "geofence"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
    }
}
