//! Calculation logic for the booking engine.
//!
//! Urgency pricing, Sunday-start calendar grids, weekly capacity rollups and
//! the small helpers behind the admin dashboard. Everything here is pure and
//! synchronous.

mod calendar;
mod dashboard;
mod pricing;
mod week_summary;

pub use calendar::{
    build_month_grid, current_and_next_week_start, month_week_starts, week_start_of,
};
pub use dashboard::{DDay, DEFAULT_PAGE_SIZE, Page, d_day, paginate};
pub use pricing::{
    FAST_MAX_DAYS, FAST_SURCHARGE, PriceQuote, RUSH_MAX_DAYS, RUSH_SURCHARGE, TierPrice,
    classify_tier, elapsed_days, elapsed_days_str, price_for_tier, quote, quote_record,
};
pub use week_summary::{count_by_day, summarize_weeks, summary_or_empty};
