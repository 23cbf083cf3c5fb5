//! Domain models for the booking engine.
//!
//! Raw sheet rows, the typed records normalized from them, write payloads,
//! and the calendar value types the aggregator produces.

mod booking;
mod calendar;
mod commission;
mod notice;
mod payload;
mod raw;

pub use booking::{Booking, BookingRecord, DEFAULT_BASE_PRICE, MAX_BASE_PRICE, PriceTier};
pub use calendar::{CalendarDay, WEEK_CAPACITY, WeekSummary};
pub use commission::{Commission, CommissionStatus};
pub use notice::{Notice, NoticeBoard, adjacent_notices, sort_newest_first};
pub use payload::{FormField, NewCommission, NewNotice};
pub use raw::{
    DATE_KEY_FORMAT, RawCommissionRow, RawNoticeRow, normalize_date, parse_amount, parse_bool,
    parse_date_key, parse_integer, parse_text,
};
