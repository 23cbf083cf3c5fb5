//! HTTP API module for the booking engine.
//!
//! Public endpoints serve quotes, the month calendar and notices; the
//! `/admin` endpoints require a bearer token with the admin claim and write
//! through to the sheet.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalendarQuery, CommissionRequest, DashboardQuery, NoticeRequest, QuoteRequest};
pub use response::{
    ApiError, ApiErrorResponse, CalendarDayView, CalendarResponse, CurrentWeeksResponse,
    DashboardEntry, DashboardResponse, HealthResponse, NoticeDetailResponse, NoticeLink, WeekCard,
    WriteResult,
};
pub use state::{AppState, Clock};
