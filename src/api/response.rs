//! Response types for the booking API.
//!
//! This module defines the response bodies of every endpoint and the error
//! mapping from [`BookingError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::{DDay, Page};
use crate::error::BookingError;
use crate::models::{Commission, MAX_BASE_PRICE, Notice, NoticeBoard, WeekSummary};

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

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<BookingError> for ApiErrorResponse {
    fn from(error: BookingError) -> Self {
        let message = error.to_string();
        match error {
            BookingError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            BookingError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            BookingError::MissingField { field } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "MISSING_FIELD",
                    message,
                    format!("Required field '{}' was blank or not provided", field),
                ),
            ),
            BookingError::InvalidDate { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details("INVALID_DATE", message, "Dates must be YYYY-MM-DD"),
            ),
            BookingError::InvalidAmount { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "VALIDATION_ERROR",
                    message,
                    format!("Amounts must be between 0 and {}", MAX_BASE_PRICE),
                ),
            ),
            BookingError::Unauthorized { .. } => ApiErrorResponse {
                status: StatusCode::UNAUTHORIZED,
                error: ApiError::new("UNAUTHORIZED", message),
            },
            BookingError::Forbidden { .. } => ApiErrorResponse {
                status: StatusCode::FORBIDDEN,
                error: ApiError::new("FORBIDDEN", message),
            },
            BookingError::NotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("NOT_FOUND", message),
            },
            BookingError::Upstream { .. } => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::new("UPSTREAM_ERROR", message),
            },
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok`.
    pub status: String,
    /// Configured service name.
    pub service: String,
    /// Crate version.
    pub version: String,
}

/// One cell of the month grid with its booking count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDayView {
    /// The day.
    pub date: NaiveDate,
    /// Whether the day belongs to the requested month.
    pub in_current_month: bool,
    /// Sunday of the day's week.
    pub week_start: NaiveDate,
    /// Reviews booked on this exact day.
    pub booked: usize,
    /// Whether the day's week is full.
    pub week_closed: bool,
}

/// A labelled week row of the month view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekCard {
    /// `Week 1`, `Week 2`, ...
    pub label: String,
    /// Capacity of the week.
    pub summary: WeekSummary,
}

/// Body of `GET /calendar`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarResponse {
    /// Year shown.
    pub year: i32,
    /// Month shown, 1 to 12.
    pub month: u32,
    /// The whole-week grid.
    pub days: Vec<CalendarDayView>,
    /// Weeks touching the month, in order.
    pub weeks: Vec<WeekCard>,
    /// Active notices.
    pub notices: NoticeBoard,
    /// The notices featured above the calendar.
    pub highlights: Vec<Notice>,
}

/// Body of `GET /weeks/current`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeeksResponse {
    /// The week containing today.
    pub this_week: WeekSummary,
    /// The week after it.
    pub next_week: WeekSummary,
}

/// A neighbour link on the notice detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoticeLink {
    /// Notice id.
    pub id: String,
    /// Notice title.
    pub title: String,
}

impl From<&Notice> for NoticeLink {
    fn from(notice: &Notice) -> Self {
        Self {
            id: notice.id.clone(),
            title: notice.title.clone(),
        }
    }
}

/// Body of `GET /notices/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoticeDetailResponse {
    /// The notice itself.
    pub notice: Notice,
    /// The newer neighbour.
    pub previous: Option<NoticeLink>,
    /// The older neighbour.
    pub next: Option<NoticeLink>,
}

/// A commission row on the dashboard list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardEntry {
    /// The commission.
    #[serde(flatten)]
    pub commission: Commission,
    /// Countdown to the review date.
    pub d_day: DDay,
    /// Review due within three days.
    pub is_soon: bool,
}

/// Body of `GET /admin/dashboard`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    /// The date the dashboard was computed for.
    pub today: NaiveDate,
    /// Capacity of the current week.
    pub this_week: WeekSummary,
    /// Capacity of the next week.
    pub next_week: WeekSummary,
    /// Reviews scheduled for today.
    pub today_reviews: Vec<Commission>,
    /// All commissions by review date, paged.
    pub commissions: Page<DashboardEntry>,
}

/// Body returned by every write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteResult {
    /// Id of the affected row.
    pub id: String,
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
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                BookingError::MissingField {
                    field: "title".to_string(),
                },
                StatusCode::BAD_REQUEST,
                "MISSING_FIELD",
            ),
            (
                BookingError::InvalidDate {
                    field: "month".to_string(),
                    value: "2026-13".to_string(),
                },
                StatusCode::BAD_REQUEST,
                "INVALID_DATE",
            ),
            (
                BookingError::InvalidAmount {
                    field: "base_price".to_string(),
                    value: -5,
                },
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                BookingError::Unauthorized {
                    message: "missing bearer token".to_string(),
                },
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
            ),
            (
                BookingError::Forbidden {
                    uid: "client".to_string(),
                },
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
            ),
            (
                BookingError::NotFound {
                    kind: "notice",
                    id: "n-9".to_string(),
                },
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                BookingError::Upstream {
                    message: "HTTP 500".to_string(),
                },
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
            ),
            (
                BookingError::ConfigNotFound {
                    path: "sheet.yaml".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
            ),
        ];

        for (error, status, code) in cases {
            let response: ApiErrorResponse = error.into();
            assert_eq!(response.status, status);
            assert_eq!(response.error.code, code);
        }
    }

    #[test]
    fn test_not_found_message_names_the_id() {
        let response: ApiErrorResponse = BookingError::NotFound {
            kind: "commission",
            id: "c-404".to_string(),
        }
        .into();
        assert_eq!(response.error.message, "commission not found: c-404");
    }
}
