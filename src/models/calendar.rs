//! Calendar display and weekly capacity types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Review slots available in every Sunday-to-Saturday week.
pub const WEEK_CAPACITY: u32 = 5;

/// One cell of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// The date shown in this cell.
    pub date: NaiveDate,
    /// False for padding days borrowed from adjacent months.
    pub in_current_month: bool,
    /// The Sunday that starts this cell's week.
    pub week_start: NaiveDate,
}

/// Booking rollup for one week.
///
/// # Example
///
/// ```
/// use commission_booking::models::{WeekSummary, WEEK_CAPACITY};
/// use chrono::NaiveDate;
///
/// let sunday = NaiveDate::from_ymd_opt(2025, 11, 30).unwrap();
/// let week = WeekSummary::with_booked(sunday, 7);
/// assert_eq!(week.capacity, WEEK_CAPACITY);
/// assert_eq!(week.remaining, 0);
/// assert!(week.is_closed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSummary {
    /// The Sunday that starts the week.
    pub week_start: NaiveDate,
    /// Slots in the week.
    pub capacity: u32,
    /// Bookings whose review date falls in the week.
    pub booked: u32,
    /// `capacity - booked`, floored at zero.
    pub remaining: u32,
    /// True once no slots remain.
    pub is_closed: bool,
}

impl WeekSummary {
    /// The summary of a week nobody has booked yet.
    pub fn empty(week_start: NaiveDate) -> Self {
        Self::with_booked(week_start, 0)
    }

    /// A summary with derived `remaining` and `is_closed`.
    pub fn with_booked(week_start: NaiveDate, booked: u32) -> Self {
        let remaining = WEEK_CAPACITY.saturating_sub(booked);
        Self {
            week_start,
            capacity: WEEK_CAPACITY,
            booked,
            remaining,
            is_closed: remaining == 0,
        }
    }
}
