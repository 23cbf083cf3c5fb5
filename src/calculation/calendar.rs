//! Sunday-start week bucketing and month grids.
//!
//! [`week_start_of`] is the single bucketing key for stored, queried and
//! displayed weeks; everything else in the engine derives week boundaries
//! through it.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime};

use crate::models::CalendarDay;

/// The Sunday on or before `date`.
///
/// # Example
///
/// ```
/// use commission_booking::calculation::week_start_of;
/// use chrono::{Datelike, NaiveDate, Weekday};
///
/// // Thursday 2025-12-04 belongs to the week of Sunday 2025-11-30.
/// let thursday = NaiveDate::from_ymd_opt(2025, 12, 4).unwrap();
/// let start = week_start_of(thursday);
/// assert_eq!(start, NaiveDate::from_ymd_opt(2025, 11, 30).unwrap());
/// assert_eq!(start.weekday(), Weekday::Sun);
/// ```
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    let offset = i64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_signed(Duration::days(offset))
        .unwrap_or(NaiveDate::MIN)
}

/// The first day of the month containing `date`.
fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// The last day of the month containing `date`.
fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Builds the display grid for the month containing `reference`.
///
/// The grid runs from the Sunday on or before the 1st to the Saturday on or
/// after the last day, so it always holds whole weeks.
///
/// # Example
///
/// ```
/// use commission_booking::calculation::build_month_grid;
/// use chrono::NaiveDate;
///
/// // December 2025 starts on a Monday and ends on a Wednesday.
/// let grid = build_month_grid(NaiveDate::from_ymd_opt(2025, 12, 15).unwrap());
/// assert_eq!(grid.len(), 35);
/// assert_eq!(grid[0].date, NaiveDate::from_ymd_opt(2025, 11, 30).unwrap());
/// assert!(!grid[0].in_current_month);
/// assert_eq!(grid.iter().filter(|d| d.in_current_month).count(), 31);
/// ```
pub fn build_month_grid(reference: NaiveDate) -> Vec<CalendarDay> {
    let grid_start = week_start_of(first_of_month(reference));
    let grid_end = week_start_of(last_of_month(reference))
        .checked_add_signed(Duration::days(6))
        .unwrap_or(NaiveDate::MAX);
    let month = reference.month();
    let year = reference.year();

    grid_start
        .iter_days()
        .take_while(|day| *day <= grid_end)
        .map(|date| CalendarDay {
            date,
            in_current_month: date.month() == month && date.year() == year,
            week_start: week_start_of(date),
        })
        .collect()
}

/// Distinct week starts of the in-month days of a grid, ascending.
///
/// These are the rows a month view labels as week 1, week 2, and so on.
pub fn month_week_starts(grid: &[CalendarDay]) -> Vec<NaiveDate> {
    let mut starts: Vec<NaiveDate> = grid
        .iter()
        .filter(|day| day.in_current_month)
        .map(|day| day.week_start)
        .collect();
    starts.sort();
    starts.dedup();
    starts
}

/// The start of the week containing `reference` and of the week after it.
pub fn current_and_next_week_start(reference: NaiveDateTime) -> (NaiveDate, NaiveDate) {
    let this_week = week_start_of(reference.date());
    let next_week = this_week
        .checked_add_signed(Duration::days(7))
        .unwrap_or(this_week);
    (this_week, next_week)
}
