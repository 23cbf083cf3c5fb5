//! Urgency pricing: elapsed days, tier classification and surcharges.
//!
//! Every function here is pure. Missing or unparseable dates never raise;
//! they yield `None` days, which classify as [`PriceTier::Normal`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Booking, PriceTier, parse_date_key};

/// The largest day gap that still counts as a rush review.
pub const RUSH_MAX_DAYS: i64 = 3;

/// The largest day gap that still counts as a fast review.
pub const FAST_MAX_DAYS: i64 = 10;

/// Surcharge for a rush review.
pub const RUSH_SURCHARGE: i64 = 50_000;

/// Surcharge for a fast review.
pub const FAST_SURCHARGE: i64 = 20_000;

/// The price for a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPrice {
    /// Base price plus surcharge.
    pub final_price: i64,
    /// The surcharge alone.
    pub extra_price: i64,
}

/// A full quote for a pair of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Days from material receipt to review; `None` when a date is missing.
    pub diff_days: Option<i64>,
    /// The tier those days fall in.
    pub price_tier: PriceTier,
    /// Base price plus surcharge.
    pub final_price: i64,
    /// The surcharge alone.
    pub extra_price: i64,
}

/// Whole days from `from` to `to`. Negative when `to` is earlier.
///
/// # Example
///
/// ```
/// use commission_booking::calculation::elapsed_days;
/// use chrono::NaiveDate;
///
/// let from = NaiveDate::from_ymd_opt(2025, 12, 1);
/// let to = NaiveDate::from_ymd_opt(2025, 12, 4);
/// assert_eq!(elapsed_days(from, to), Some(3));
/// assert_eq!(elapsed_days(to, from), Some(-3));
/// assert_eq!(elapsed_days(None, to), None);
/// ```
pub fn elapsed_days(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Option<i64> {
    let (from, to) = (from?, to?);
    Some(to.signed_duration_since(from).num_days())
}

/// [`elapsed_days`] over `YYYY-MM-DD` keys; unparseable keys give `None`.
pub fn elapsed_days_str(from: &str, to: &str) -> Option<i64> {
    elapsed_days(parse_date_key(from), parse_date_key(to))
}

/// Maps a day gap to its tier.
///
/// Buckets are closed on the upper bound: 3 days is still a rush, 10 days
/// still fast. An unknown gap falls back to `Normal`.
///
/// # Example
///
/// ```
/// use commission_booking::calculation::classify_tier;
/// use commission_booking::models::PriceTier;
///
/// assert_eq!(classify_tier(Some(3)), PriceTier::Rush);
/// assert_eq!(classify_tier(Some(10)), PriceTier::Fast);
/// assert_eq!(classify_tier(Some(11)), PriceTier::Normal);
/// assert_eq!(classify_tier(None), PriceTier::Normal);
/// ```
pub fn classify_tier(diff: Option<i64>) -> PriceTier {
    match diff {
        None => PriceTier::Normal,
        Some(days) if days <= RUSH_MAX_DAYS => PriceTier::Rush,
        Some(days) if days <= FAST_MAX_DAYS => PriceTier::Fast,
        Some(_) => PriceTier::Normal,
    }
}

/// Looks up the surcharge for a tier and applies it to `base_price`.
///
/// The sum saturates, so sheet-supplied base prices near `i64::MAX` cannot wrap.
pub fn price_for_tier(tier: PriceTier, base_price: i64) -> TierPrice {
    let extra_price = match tier {
        PriceTier::Rush => RUSH_SURCHARGE,
        PriceTier::Fast => FAST_SURCHARGE,
        PriceTier::Normal | PriceTier::Pending => 0,
    };

    TierPrice {
        final_price: base_price.saturating_add(extra_price),
        extra_price,
    }
}

/// Prices a review from the material and review dates.
///
/// # Example
///
/// ```
/// use commission_booking::calculation::quote;
/// use commission_booking::models::{PriceTier, parse_date_key};
///
/// let q = quote(parse_date_key("2025-12-01"), parse_date_key("2025-12-04"), 50_000);
/// assert_eq!(q.diff_days, Some(3));
/// assert_eq!(q.price_tier, PriceTier::Rush);
/// assert_eq!(q.final_price, 100_000);
/// assert_eq!(q.extra_price, 50_000);
/// ```
pub fn quote(material: Option<NaiveDate>, review: Option<NaiveDate>, base_price: i64) -> PriceQuote {
    let diff_days = elapsed_days(material, review);
    let price_tier = classify_tier(diff_days);
    let TierPrice {
        final_price,
        extra_price,
    } = price_for_tier(price_tier, base_price);

    PriceQuote {
        diff_days,
        price_tier,
        final_price,
        extra_price,
    }
}

/// Prices a record from its own dates and base price.
pub fn quote_record<B: Booking + ?Sized>(record: &B) -> PriceQuote {
    quote(
        record.material_received_date(),
        record.review_date(),
        record.base_price(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingRecord, DEFAULT_BASE_PRICE};

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_same_day_is_zero() {
        let d = Some(make_date("2025-12-01"));
        assert_eq!(elapsed_days(d, d), Some(0));
    }

    #[test]
    fn test_elapsed_days_across_dst_and_year_end() {
        // Dates carry no time of day, so a DST change in March cannot shift the count.
        assert_eq!(elapsed_days_str("2025-03-08", "2025-03-10"), Some(2));
        assert_eq!(elapsed_days_str("2025-12-30", "2026-01-02"), Some(3));
    }

    #[test]
    fn test_elapsed_days_leap_february() {
        assert_eq!(elapsed_days_str("2024-02-28", "2024-03-01"), Some(2));
        assert_eq!(elapsed_days_str("2025-02-28", "2025-03-01"), Some(1));
    }

    #[test]
    fn test_elapsed_days_str_accepts_timestamps() {
        assert_eq!(
            elapsed_days_str("2025-12-01T09:00:00Z", "2025-12-04"),
            Some(3)
        );
    }

    #[test]
    fn test_elapsed_days_str_unparseable() {
        assert_eq!(elapsed_days_str("", "2025-12-04"), None);
        assert_eq!(elapsed_days_str("2025-12-01", "soon"), None);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify_tier(Some(-2)), PriceTier::Rush);
        assert_eq!(classify_tier(Some(0)), PriceTier::Rush);
        assert_eq!(classify_tier(Some(3)), PriceTier::Rush);
        assert_eq!(classify_tier(Some(4)), PriceTier::Fast);
        assert_eq!(classify_tier(Some(10)), PriceTier::Fast);
        assert_eq!(classify_tier(Some(11)), PriceTier::Normal);
        assert_eq!(classify_tier(None), PriceTier::Normal);
    }

    #[test]
    fn test_classify_never_pending() {
        for days in -30..60 {
            assert_ne!(classify_tier(Some(days)), PriceTier::Pending);
        }
        assert_ne!(classify_tier(None), PriceTier::Pending);
    }

    #[test]
    fn test_price_table() {
        assert_eq!(
            price_for_tier(PriceTier::Rush, 50_000),
            TierPrice {
                final_price: 100_000,
                extra_price: 50_000
            }
        );
        assert_eq!(
            price_for_tier(PriceTier::Fast, 50_000),
            TierPrice {
                final_price: 70_000,
                extra_price: 20_000
            }
        );
        assert_eq!(
            price_for_tier(PriceTier::Normal, 50_000),
            TierPrice {
                final_price: 50_000,
                extra_price: 0
            }
        );
        assert_eq!(
            price_for_tier(PriceTier::Pending, 50_000),
            TierPrice {
                final_price: 50_000,
                extra_price: 0
            }
        );
    }

    #[test]
    fn test_huge_base_price_saturates() {
        let q = quote(Some(make_date("2025-12-01")), Some(make_date("2025-12-04")), i64::MAX);
        assert_eq!(q.price_tier, PriceTier::Rush);
        assert_eq!(q.final_price, i64::MAX);
        assert_eq!(q.extra_price, RUSH_SURCHARGE);
    }

    #[test]
    fn test_unknown_tier_token_prices_as_normal() {
        let tier = PriceTier::from_str_lossy("PLATINUM");
        assert_eq!(price_for_tier(tier, 80_000).final_price, 80_000);
    }

    #[test]
    fn test_quote_rush() {
        let q = quote(
            Some(make_date("2025-12-01")),
            Some(make_date("2025-12-04")),
            50_000,
        );
        assert_eq!(
            q,
            PriceQuote {
                diff_days: Some(3),
                price_tier: PriceTier::Rush,
                final_price: 100_000,
                extra_price: 50_000,
            }
        );
    }

    #[test]
    fn test_quote_missing_material_is_normal() {
        let q = quote(None, Some(make_date("2025-12-04")), 50_000);
        assert_eq!(q.diff_days, None);
        assert_eq!(q.price_tier, PriceTier::Normal);
        assert_eq!(q.final_price, 50_000);
        assert_eq!(q.extra_price, 0);
    }

    #[test]
    fn test_quote_record_uses_base_price() {
        let mut record =
            BookingRecord::new(make_date("2025-12-20")).with_material(make_date("2025-12-12"));
        record.base_price = 65_000;

        let q = quote_record(&record);
        assert_eq!(q.diff_days, Some(8));
        assert_eq!(q.price_tier, PriceTier::Fast);
        assert_eq!(q.final_price, 85_000);
        assert_ne!(record.base_price, DEFAULT_BASE_PRICE);
    }

    #[test]
    fn test_quote_serialization() {
        let q = quote(None, None, 50_000);
        let json = serde_json::to_value(q).unwrap();
        assert!(json["diff_days"].is_null());
        assert_eq!(json["price_tier"], "NORMAL");
        assert_eq!(json["final_price"], 50_000);
    }
}
