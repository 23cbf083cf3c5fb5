//! Admin dashboard helpers: D-day labels and paging.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Rows per page on the admin dashboard.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Countdown from today to a review date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DDay {
    /// `D-day`, `D-n` before the date, `D+n` after it.
    pub label: String,
    /// Signed days from today to the target.
    pub days: i64,
}

impl DDay {
    /// Today or within the next three days.
    pub fn is_soon(&self) -> bool {
        (0..=3).contains(&self.days)
    }
}

/// Labels the distance from `today` to `target`.
///
/// # Example
///
/// ```
/// use commission_booking::calculation::d_day;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2025, 12, 4).unwrap();
/// assert_eq!(d_day(today, today).label, "D-day");
/// assert_eq!(d_day(NaiveDate::from_ymd_opt(2025, 12, 7).unwrap(), today).label, "D-3");
/// assert_eq!(d_day(NaiveDate::from_ymd_opt(2025, 12, 2).unwrap(), today).label, "D+2");
/// ```
pub fn d_day(target: NaiveDate, today: NaiveDate) -> DDay {
    let days = target.signed_duration_since(today).num_days();
    let label = match days {
        0 => "D-day".to_string(),
        d if d > 0 => format!("D-{}", d),
        d => format!("D+{}", -d),
    };
    DDay { label, days }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// 1-based page number actually served.
    pub page: usize,
    /// Number of pages; at least 1 even when empty.
    pub total_pages: usize,
    /// Items across all pages.
    pub total_items: usize,
}

/// Cuts `items` into pages and returns the requested one.
///
/// Out-of-range page numbers are clamped to the first or last page. A page
/// size of zero is treated as one.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    let items = items
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    Page {
        items,
        page,
        total_pages,
        total_items,
    }
}
