//! Request types for the booking API.
//!
//! Dates arrive as `YYYY-MM-DD` strings. The quote endpoint is lenient and
//! prices unparseable dates as unknown; write endpoints reject them.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, BookingResult};
use crate::models::{
    CommissionStatus, DEFAULT_BASE_PRICE, MAX_BASE_PRICE, NewCommission, NewNotice,
    parse_date_key,
};

/// Years the calendar accepts; every `YYYY-MM-DD` key falls inside.
const CALENDAR_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// Rejects base prices below zero or above [`MAX_BASE_PRICE`].
fn checked_base_price(value: Option<i64>) -> BookingResult<Option<i64>> {
    match value {
        Some(amount) if !(0..=MAX_BASE_PRICE).contains(&amount) => {
            Err(BookingError::InvalidAmount {
                field: "base_price".to_string(),
                value: amount,
            })
        }
        other => Ok(other),
    }
}

/// Request body for `POST /quote`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Date the material was received.
    #[serde(default)]
    pub material_received_date: Option<String>,
    /// Date of the review slot.
    #[serde(default)]
    pub review_date: Option<String>,
    /// Base price; 50,000 when omitted.
    #[serde(default)]
    pub base_price: Option<i64>,
}

impl QuoteRequest {
    /// The base price to quote with.
    pub fn base_price(&self) -> BookingResult<i64> {
        Ok(checked_base_price(self.base_price)?.unwrap_or(DEFAULT_BASE_PRICE))
    }
}

/// Query string of `GET /calendar`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CalendarQuery {
    /// Calendar year; defaults to the current year.
    pub year: Option<i32>,
    /// Month 1 to 12; defaults to the current month.
    pub month: Option<u32>,
}

impl CalendarQuery {
    /// The first day of the requested month, never earlier than the current month.
    pub fn reference_date(&self, today: NaiveDate) -> BookingResult<NaiveDate> {
        let year = self.year.unwrap_or(today.year());
        let month = self.month.unwrap_or(today.month());

        if !CALENDAR_YEARS.contains(&year) {
            return Err(BookingError::InvalidDate {
                field: "year".to_string(),
                value: year.to_string(),
            });
        }
        let requested =
            NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| BookingError::InvalidDate {
                field: "month".to_string(),
                value: format!("{}-{:02}", year, month),
            })?;
        let current = today.with_day(1).unwrap_or(today);

        Ok(requested.max(current))
    }
}

/// Query string of `GET /admin/dashboard`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DashboardQuery {
    /// 1-based page of the commission list.
    pub page: Option<usize>,
}

/// Request body for creating or replacing a commission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionRequest {
    /// Client nickname.
    pub client_name: String,
    /// Name on the deposit.
    #[serde(default)]
    pub depositor_name: String,
    /// Status token; unknown or missing tokens mean `PAID`.
    #[serde(default)]
    pub status: Option<String>,
    /// Review slot date.
    pub review_date: String,
    /// Material date; blank means not yet received.
    #[serde(default)]
    pub material_received_date: Option<String>,
    /// Free-form note; blank clears it.
    #[serde(default)]
    pub memo: Option<String>,
    /// Base price; kept from the stored row on update, 50,000 on create.
    #[serde(default)]
    pub base_price: Option<i64>,
}

fn required_date(field: &str, value: &str) -> BookingResult<NaiveDate> {
    if value.trim().is_empty() {
        return Err(BookingError::MissingField {
            field: field.to_string(),
        });
    }
    parse_date_key(value).ok_or_else(|| BookingError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn optional_date(field: &str, value: Option<&str>) -> BookingResult<Option<NaiveDate>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => required_date(field, value).map(Some),
        None => Ok(None),
    }
}

impl TryFrom<CommissionRequest> for NewCommission {
    type Error = BookingError;

    fn try_from(req: CommissionRequest) -> Result<Self, Self::Error> {
        let review_date = required_date("review_date", &req.review_date)?;
        let material_received_date =
            optional_date("material_received_date", req.material_received_date.as_deref())?;

        Ok(NewCommission {
            client_name: req.client_name,
            depositor_name: req.depositor_name,
            status: req
                .status
                .as_deref()
                .map(CommissionStatus::from_str_lossy)
                .unwrap_or(CommissionStatus::Paid),
            review_date,
            material_received_date,
            memo: req.memo.filter(|m| !m.trim().is_empty()),
            base_price: checked_base_price(req.base_price)?,
        })
    }
}

fn default_active() -> bool {
    true
}

/// Request body for creating or replacing a notice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoticeRequest {
    /// Title line.
    pub title: String,
    /// Rich-text body.
    pub body: String,
    /// Pin to the top of listings.
    #[serde(default)]
    pub is_pinned: bool,
    /// Show publicly.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl From<NoticeRequest> for NewNotice {
    fn from(req: NoticeRequest) -> Self {
        NewNotice {
            title: req.title,
            body: req.body,
            is_pinned: req.is_pinned,
            is_active: req.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn commission_request() -> CommissionRequest {
        CommissionRequest {
            client_name: "kim".to_string(),
            depositor_name: String::new(),
            status: None,
            review_date: "2025-12-04".to_string(),
            material_received_date: Some(" ".to_string()),
            memo: Some(String::new()),
            base_price: None,
        }
    }

    #[test]
    fn test_calendar_defaults_to_current_month() {
        let query = CalendarQuery::default();
        assert_eq!(
            query.reference_date(make_date("2025-12-17")).unwrap(),
            make_date("2025-12-01")
        );
    }

    #[test]
    fn test_calendar_clamps_past_months() {
        let query = CalendarQuery {
            year: Some(2025),
            month: Some(3),
        };
        assert_eq!(
            query.reference_date(make_date("2025-12-17")).unwrap(),
            make_date("2025-12-01")
        );
    }

    #[test]
    fn test_calendar_future_month() {
        let query = CalendarQuery {
            year: Some(2026),
            month: Some(2),
        };
        assert_eq!(
            query.reference_date(make_date("2025-12-17")).unwrap(),
            make_date("2026-02-01")
        );
    }

    #[test]
    fn test_calendar_rejects_month_13() {
        let query = CalendarQuery {
            year: Some(2026),
            month: Some(13),
        };
        match query.reference_date(make_date("2025-12-17")) {
            Err(BookingError::InvalidDate { field, value }) => {
                assert_eq!(field, "month");
                assert_eq!(value, "2026-13");
            }
            other => panic!("Expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_calendar_rejects_years_outside_date_keys() {
        for year in [0, 10_000, NaiveDate::MAX.year()] {
            let query = CalendarQuery {
                year: Some(year),
                month: Some(12),
            };
            match query.reference_date(make_date("2025-12-02")) {
                Err(BookingError::InvalidDate { field, value }) => {
                    assert_eq!(field, "year");
                    assert_eq!(value, year.to_string());
                }
                other => panic!("Expected InvalidDate for {}, got {:?}", year, other),
            }
        }

        let last = CalendarQuery {
            year: Some(9999),
            month: Some(12),
        };
        assert_eq!(
            last.reference_date(make_date("2025-12-02")).unwrap(),
            make_date("9999-12-01")
        );
    }

    #[test]
    fn test_quote_base_price_bounds() {
        let mut req = QuoteRequest::default();
        assert_eq!(req.base_price().unwrap(), DEFAULT_BASE_PRICE);

        req.base_price = Some(0);
        assert_eq!(req.base_price().unwrap(), 0);

        req.base_price = Some(MAX_BASE_PRICE);
        assert_eq!(req.base_price().unwrap(), MAX_BASE_PRICE);

        for bad in [-1, MAX_BASE_PRICE + 1, i64::MAX] {
            req.base_price = Some(bad);
            assert!(matches!(
                req.base_price(),
                Err(BookingError::InvalidAmount { value, .. }) if value == bad
            ));
        }
    }

    #[test]
    fn test_commission_request_base_price() {
        let mut req = commission_request();
        req.base_price = Some(65_000);
        assert_eq!(NewCommission::try_from(req).unwrap().base_price, Some(65_000));

        let mut req = commission_request();
        req.base_price = Some(-10);
        assert!(matches!(
            NewCommission::try_from(req),
            Err(BookingError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_commission_request_conversion() {
        let payload = NewCommission::try_from(commission_request()).unwrap();
        assert_eq!(payload.review_date, make_date("2025-12-04"));
        assert_eq!(payload.material_received_date, None);
        assert_eq!(payload.status, CommissionStatus::Paid);
        assert_eq!(payload.memo, None);
        assert_eq!(payload.base_price, None);
    }

    #[test]
    fn test_commission_request_status_token() {
        let mut req = commission_request();
        req.status = Some("DONE".to_string());
        assert_eq!(
            NewCommission::try_from(req).unwrap().status,
            CommissionStatus::Done
        );
    }

    #[test]
    fn test_commission_request_bad_dates() {
        let mut req = commission_request();
        req.review_date = "tomorrow".to_string();
        assert!(matches!(
            NewCommission::try_from(req),
            Err(BookingError::InvalidDate { field, .. }) if field == "review_date"
        ));

        let mut req = commission_request();
        req.review_date = String::new();
        assert!(matches!(
            NewCommission::try_from(req),
            Err(BookingError::MissingField { field }) if field == "review_date"
        ));

        let mut req = commission_request();
        req.material_received_date = Some("2025-02-30".to_string());
        assert!(matches!(
            NewCommission::try_from(req),
            Err(BookingError::InvalidDate { field, .. }) if field == "material_received_date"
        ));
    }

    #[test]
    fn test_notice_request_defaults() {
        let req: NoticeRequest =
            serde_json::from_str(r#"{"title": "Holiday", "body": "Closed"}"#).unwrap();
        let notice: NewNotice = req.into();
        assert!(!notice.is_pinned);
        assert!(notice.is_active);
    }
}
