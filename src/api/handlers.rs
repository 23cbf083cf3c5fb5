//! HTTP request handlers for the booking API.
//!
//! This module contains the handler functions for all API endpoints. Every
//! request gets a correlation id that tags its log lines.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::Datelike;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::require_admin;
use crate::calculation::{
    DEFAULT_PAGE_SIZE, build_month_grid, count_by_day, current_and_next_week_start, d_day,
    month_week_starts, paginate, quote, summarize_weeks, summary_or_empty,
};
use crate::error::{BookingError, BookingResult};
use crate::models::{NewCommission, NewNotice, NoticeBoard, adjacent_notices, parse_date_key};

use super::request::{
    CalendarQuery, CommissionRequest, DashboardQuery, NoticeRequest, QuoteRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, CalendarDayView, CalendarResponse, CurrentWeeksResponse,
    DashboardEntry, DashboardResponse, HealthResponse, NoticeDetailResponse, NoticeLink, WeekCard,
    WriteResult,
};
use super::state::AppState;

/// How many notices the calendar features above the grid.
const HIGHLIGHT_LIMIT: usize = 2;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/quote", post(quote_handler))
        .route("/calendar", get(calendar_handler))
        .route("/weeks/current", get(current_weeks_handler))
        .route("/notices", get(notices_handler))
        .route("/notices/:id", get(notice_detail_handler))
        .route("/admin/dashboard", get(dashboard_handler))
        .route("/admin/commissions", post(create_commission_handler))
        .route(
            "/admin/commissions/:id",
            get(get_commission_handler).put(update_commission_handler),
        )
        .route("/admin/notices", post(create_notice_handler))
        .route(
            "/admin/notices/:id",
            put(update_notice_handler).delete(delete_notice_handler),
        )
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, operation: &'static str, err: BookingError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        operation,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, &api_error.error)
}

fn respond<T: Serialize>(
    correlation_id: Uuid,
    operation: &'static str,
    started: Instant,
    status: StatusCode,
    result: BookingResult<T>,
) -> Response {
    match result {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                operation,
                duration_us = started.elapsed().as_micros(),
                "Request completed"
            );
            json_response(status, &body)
        }
        Err(err) => error_response(correlation_id, operation, err),
    }
}

/// Maps a body rejection to a 400 response.
fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> Response {
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
    json_response(StatusCode::BAD_REQUEST, &error)
}

fn query_rejection(correlation_id: Uuid, rejection: QueryRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Query string error"
    );
    json_response(
        StatusCode::BAD_REQUEST,
        &ApiError::validation_error(body_text),
    )
}

/// Admin gate for write and dashboard routes. Yields the raw bearer token.
async fn authorize(
    state: &AppState,
    headers: &HeaderMap,
    correlation_id: Uuid,
) -> Result<String, Response> {
    match require_admin(state.verifier(), headers).await {
        Ok((identity, token)) => {
            info!(correlation_id = %correlation_id, uid = %identity.uid, "Admin authorized");
            Ok(token)
        }
        Err(err) => Err(error_response(correlation_id, "authorize", err)),
    }
}

/// Handler for GET /health.
async fn health_handler(State(state): State<AppState>) -> Response {
    json_response(
        StatusCode::OK,
        &HealthResponse {
            status: "ok".to_string(),
            service: state.config().config().service().name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    )
}

/// Handler for POST /quote.
///
/// Prices a review from two dates without touching the sheet.
async fn quote_handler(payload: Result<Json<QuoteRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    info!(correlation_id = %correlation_id, "Processing quote request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let result = request.base_price().map(|base_price| {
        quote(
            request
                .material_received_date
                .as_deref()
                .and_then(parse_date_key),
            request.review_date.as_deref().and_then(parse_date_key),
            base_price,
        )
    });
    respond(correlation_id, "quote", started, StatusCode::OK, result)
}

async fn build_calendar(state: &AppState, query: CalendarQuery) -> BookingResult<CalendarResponse> {
    let reference = query.reference_date(state.today())?;
    let commissions = state.repository().commissions().await?;
    let notices = state.repository().notices().await?;

    let grid = build_month_grid(reference);
    let weeks = summarize_weeks(commissions.as_slice());

    let days = grid
        .iter()
        .map(|day| CalendarDayView {
            date: day.date,
            in_current_month: day.in_current_month,
            week_start: day.week_start,
            booked: count_by_day(commissions.as_slice(), day.date),
            week_closed: summary_or_empty(&weeks, day.week_start).is_closed,
        })
        .collect();

    let week_cards = month_week_starts(&grid)
        .into_iter()
        .enumerate()
        .map(|(index, week_start)| WeekCard {
            label: format!("Week {}", index + 1),
            summary: summary_or_empty(&weeks, week_start),
        })
        .collect();

    let board = NoticeBoard::from_notices(notices.as_slice());
    let highlights = board
        .highlights(HIGHLIGHT_LIMIT)
        .into_iter()
        .cloned()
        .collect();

    Ok(CalendarResponse {
        year: reference.year(),
        month: reference.month(),
        days,
        weeks: week_cards,
        notices: board,
        highlights,
    })
}

/// Handler for GET /calendar.
async fn calendar_handler(
    State(state): State<AppState>,
    query: Result<Query<CalendarQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    info!(correlation_id = %correlation_id, "Processing calendar request");

    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };

    let result = build_calendar(&state, query).await;
    respond(correlation_id, "calendar", started, StatusCode::OK, result)
}

async fn current_weeks(state: &AppState) -> BookingResult<CurrentWeeksResponse> {
    let commissions = state.repository().commissions().await?;
    let weeks = summarize_weeks(commissions.as_slice());
    let (this_week, next_week) = current_and_next_week_start(state.now());

    Ok(CurrentWeeksResponse {
        this_week: summary_or_empty(&weeks, this_week),
        next_week: summary_or_empty(&weeks, next_week),
    })
}

/// Handler for GET /weeks/current.
async fn current_weeks_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let result = current_weeks(&state).await;
    respond(correlation_id, "current_weeks", started, StatusCode::OK, result)
}

/// Handler for GET /notices.
async fn notices_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let result = state
        .repository()
        .notices()
        .await
        .map(|notices| NoticeBoard::from_notices(notices.as_slice()));
    respond(correlation_id, "notices", started, StatusCode::OK, result)
}

async fn notice_detail(state: &AppState, id: &str) -> BookingResult<NoticeDetailResponse> {
    let notice = state.repository().find_notice(id).await?;
    let notices = state.repository().notices().await?;
    let (previous, next) = adjacent_notices(notices.as_slice(), id);

    Ok(NoticeDetailResponse {
        notice,
        previous: previous.map(NoticeLink::from),
        next: next.map(NoticeLink::from),
    })
}

/// Handler for GET /notices/:id.
///
/// Inactive notices are still served; they just have no neighbours.
async fn notice_detail_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let result = notice_detail(&state, &id).await;
    respond(correlation_id, "notice_detail", started, StatusCode::OK, result)
}

async fn build_dashboard(state: &AppState, query: DashboardQuery) -> BookingResult<DashboardResponse> {
    let today = state.today();
    let commissions = state.repository().commissions().await?;
    let weeks = summarize_weeks(commissions.as_slice());
    let (this_week, next_week) = current_and_next_week_start(state.now());

    let today_reviews = commissions
        .iter()
        .filter(|c| c.review_date == today)
        .cloned()
        .collect();

    let mut sorted = commissions.to_vec();
    sorted.sort_by_key(|c| c.review_date);
    let entries = sorted
        .into_iter()
        .map(|commission| {
            let d_day = d_day(commission.review_date, today);
            DashboardEntry {
                is_soon: d_day.is_soon(),
                d_day,
                commission,
            }
        })
        .collect();

    Ok(DashboardResponse {
        today,
        this_week: summary_or_empty(&weeks, this_week),
        next_week: summary_or_empty(&weeks, next_week),
        today_reviews,
        commissions: paginate(entries, query.page.unwrap_or(1), DEFAULT_PAGE_SIZE),
    })
}

/// Handler for GET /admin/dashboard.
async fn dashboard_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    info!(correlation_id = %correlation_id, "Processing dashboard request");

    if let Err(response) = authorize(&state, &headers, correlation_id).await {
        return response;
    }
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };

    let result = build_dashboard(&state, query).await;
    respond(correlation_id, "dashboard", started, StatusCode::OK, result)
}

/// Handler for GET /admin/commissions/:id.
async fn get_commission_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();

    if let Err(response) = authorize(&state, &headers, correlation_id).await {
        return response;
    }

    let result = state.repository().find_commission(&id).await;
    respond(correlation_id, "get_commission", started, StatusCode::OK, result)
}

async fn save_commission(
    state: &AppState,
    id: Option<&str>,
    request: CommissionRequest,
    token: &str,
) -> BookingResult<WriteResult> {
    let payload = NewCommission::try_from(request)?;
    let repository = state.repository();
    let id = match id {
        Some(id) => repository.update_commission(id, &payload, token).await?,
        None => repository.create_commission(&payload, token).await?,
    };
    Ok(WriteResult { id })
}

/// Handler for POST /admin/commissions.
async fn create_commission_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CommissionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    info!(correlation_id = %correlation_id, "Processing commission create");

    let token = match authorize(&state, &headers, correlation_id).await {
        Ok(token) => token,
        Err(response) => return response,
    };
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let result = save_commission(&state, None, request, &token).await;
    respond(correlation_id, "create_commission", started, StatusCode::CREATED, result)
}

/// Handler for PUT /admin/commissions/:id.
async fn update_commission_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<CommissionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    info!(correlation_id = %correlation_id, commission_id = %id, "Processing commission update");

    let token = match authorize(&state, &headers, correlation_id).await {
        Ok(token) => token,
        Err(response) => return response,
    };
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let result = save_commission(&state, Some(&id), request, &token).await;
    respond(correlation_id, "update_commission", started, StatusCode::OK, result)
}

async fn save_notice(
    state: &AppState,
    id: Option<&str>,
    request: NoticeRequest,
    token: &str,
) -> BookingResult<WriteResult> {
    let payload = NewNotice::from(request);
    let repository = state.repository();
    let id = match id {
        Some(id) => repository.update_notice(id, &payload, token).await?,
        None => repository.create_notice(&payload, token).await?,
    };
    Ok(WriteResult { id })
}

/// Handler for POST /admin/notices.
async fn create_notice_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<NoticeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    info!(correlation_id = %correlation_id, "Processing notice create");

    let token = match authorize(&state, &headers, correlation_id).await {
        Ok(token) => token,
        Err(response) => return response,
    };
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let result = save_notice(&state, None, request, &token).await;
    respond(correlation_id, "create_notice", started, StatusCode::CREATED, result)
}

/// Handler for PUT /admin/notices/:id.
async fn update_notice_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<NoticeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    info!(correlation_id = %correlation_id, notice_id = %id, "Processing notice update");

    let token = match authorize(&state, &headers, correlation_id).await {
        Ok(token) => token,
        Err(response) => return response,
    };
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let result = save_notice(&state, Some(&id), request, &token).await;
    respond(correlation_id, "update_notice", started, StatusCode::OK, result)
}

/// Handler for DELETE /admin/notices/:id.
async fn delete_notice_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    info!(correlation_id = %correlation_id, notice_id = %id, "Processing notice delete");

    let token = match authorize(&state, &headers, correlation_id).await {
        Ok(token) => token,
        Err(response) => return response,
    };

    let result = state
        .repository()
        .delete_notice(&id, &token)
        .await
        .map(|id| WriteResult { id });
    respond(correlation_id, "delete_notice", started, StatusCode::OK, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::NaiveDateTime;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::auth::StaticTokenVerifier;
    use crate::calculation::PriceQuote;
    use crate::config::{
        AuthConfig, BookingConfig, ConfigLoader, ServiceConfig, SheetConfig, TokenEntry,
    };
    use crate::models::PriceTier;
    use crate::sheet::{
        RecordCache, SheetClient, SheetName, SheetRepository, WriteRequest, WriteResponse,
    };

    struct StubSheet;

    #[async_trait]
    impl SheetClient for StubSheet {
        async fn fetch_rows(&self, sheet: SheetName) -> BookingResult<Vec<Value>> {
            Ok(match sheet {
                SheetName::Commission => vec![json!({
                    "id": "c-1",
                    "clientName": "kim",
                    "reviewDate": "2025-12-04",
                    "materialReceivedDate": "2025-12-01"
                })],
                SheetName::Notices => vec![],
            })
        }

        async fn submit(
            &self,
            _sheet: SheetName,
            _request: WriteRequest,
        ) -> BookingResult<WriteResponse> {
            Ok(WriteResponse {
                ok: true,
                id: Some("new".to_string()),
                ..Default::default()
            })
        }
    }

    fn create_test_state() -> AppState {
        let config = BookingConfig::new(
            ServiceConfig {
                name: "test-booking".to_string(),
                bind_address: "127.0.0.1:0".to_string(),
            },
            SheetConfig {
                base_url: "http://unused".to_string(),
                timeout_secs: 1,
                cache_ttl_secs: 180,
            },
            AuthConfig {
                tokens: vec![TokenEntry {
                    token: "admin".to_string(),
                    uid: "owner".to_string(),
                    admin: true,
                }],
            },
        );
        let verifier = StaticTokenVerifier::from_config(config.auth());
        let repository =
            SheetRepository::new(Arc::new(StubSheet), RecordCache::new(Duration::from_secs(180)));

        AppState::new(ConfigLoader::from_config(config), repository, Arc::new(verifier))
            .with_clock(|| {
                NaiveDateTime::parse_from_str("2025-12-02 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
            })
    }

    async fn body_json(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_service_name() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["service"], "test-booking");
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_quote_returns_rush_price() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/quote")
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        r#"{"material_received_date": "2025-12-01", "review_date": "2025-12-04"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let quote: PriceQuote = serde_json::from_slice(&body).unwrap();
        assert_eq!(quote.diff_days, Some(3));
        assert_eq!(quote.price_tier, PriceTier::Rush);
        assert_eq!(quote.final_price, 100_000);
    }

    #[tokio::test]
    async fn test_quote_malformed_json_returns_400() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/quote")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{invalid json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_current_weeks_uses_clock() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/weeks/current")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["this_week"]["week_start"], "2025-11-30");
        assert_eq!(body["this_week"]["booked"], 1);
        assert_eq!(body["next_week"]["week_start"], "2025-12-07");
        assert_eq!(body["next_week"]["remaining"], 5);
    }

    #[tokio::test]
    async fn test_admin_route_without_token_returns_401() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/admin/dashboard")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let error: ApiError = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(error.code, "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_create_notice_missing_title_returns_400() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/admin/notices")
                    .header("Content-Type", "application/json")
                    .header("Authorization", "Bearer admin")
                    .body(Body::from(r#"{"body": "Closed"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("title"));
    }
}
