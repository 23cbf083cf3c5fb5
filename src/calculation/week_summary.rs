//! Weekly capacity rollups and per-day counts.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{Booking, WeekSummary};

use super::calendar::week_start_of;

/// Groups bookings by review week and derives capacity for each week seen.
///
/// Records without a review date are skipped. Weeks with no bookings are
/// absent from the map; use [`summary_or_empty`] to read a week that may not
/// be there.
///
/// # Example
///
/// ```
/// use commission_booking::calculation::summarize_weeks;
/// use commission_booking::models::BookingRecord;
/// use chrono::NaiveDate;
///
/// let day = |d| NaiveDate::from_ymd_opt(2025, 12, d).unwrap();
/// let records: Vec<_> = [1, 2, 3, 4, 6].into_iter().map(|d| BookingRecord::new(day(d))).collect();
///
/// let weeks = summarize_weeks(&records);
/// let week = &weeks[&NaiveDate::from_ymd_opt(2025, 11, 30).unwrap()];
/// assert_eq!(week.booked, 5);
/// assert!(week.is_closed);
/// ```
pub fn summarize_weeks<B: Booking>(records: &[B]) -> BTreeMap<NaiveDate, WeekSummary> {
    let mut booked: BTreeMap<NaiveDate, u32> = BTreeMap::new();

    for review_date in records.iter().filter_map(Booking::review_date) {
        *booked.entry(week_start_of(review_date)).or_insert(0) += 1;
    }

    booked
        .into_iter()
        .map(|(week_start, count)| (week_start, WeekSummary::with_booked(week_start, count)))
        .collect()
}

/// Reads a week from a summary map, defaulting to an open, empty week.
pub fn summary_or_empty(
    weeks: &BTreeMap<NaiveDate, WeekSummary>,
    week_start: NaiveDate,
) -> WeekSummary {
    weeks
        .get(&week_start)
        .copied()
        .unwrap_or_else(|| WeekSummary::empty(week_start))
}

/// Number of bookings reviewed exactly on `date`.
pub fn count_by_day<B: Booking>(records: &[B], date: NaiveDate) -> usize {
    records
        .iter()
        .filter(|record| record.review_date() == Some(date))
        .count()
}
