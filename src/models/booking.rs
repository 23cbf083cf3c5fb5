//! The minimal booking shape the pricing and calendar core consumes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Base price applied when a record carries none.
pub const DEFAULT_BASE_PRICE: i64 = 50_000;

/// Largest base price a request may carry.
pub const MAX_BASE_PRICE: i64 = 100_000_000;

/// Discrete pricing category derived from how urgent a review is.
///
/// `Pending` is never produced by the tier function; record normalization
/// assigns it when the material date is still unknown.
///
/// # Example
///
/// ```
/// use commission_booking::models::PriceTier;
///
/// assert_eq!(PriceTier::from_str_lossy("fast"), PriceTier::Fast);
/// assert_eq!(PriceTier::from_str_lossy("EXPRESS"), PriceTier::Normal);
/// assert_eq!(PriceTier::Rush.to_string(), "RUSH");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceTier {
    /// Review within three days of receiving material.
    Rush,
    /// Review within ten days.
    Fast,
    /// Anything slower, and the fallback for unknown input.
    Normal,
    /// Awaiting the material date; priced like `Normal`.
    Pending,
}

impl PriceTier {
    /// Parses a tier token, treating anything unrecognised as `Normal`.
    pub fn from_str_lossy(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "RUSH" => PriceTier::Rush,
            "FAST" => PriceTier::Fast,
            "PENDING" => PriceTier::Pending,
            _ => PriceTier::Normal,
        }
    }

    /// The wire token for this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceTier::Rush => "RUSH",
            PriceTier::Fast => "FAST",
            PriceTier::Normal => "NORMAL",
            PriceTier::Pending => "PENDING",
        }
    }
}

impl std::fmt::Display for PriceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything that occupies a review slot and can be priced.
pub trait Booking {
    /// The date the booking consumes a slot, if known.
    fn review_date(&self) -> Option<NaiveDate>;

    /// The date the client's material arrived, if known.
    fn material_received_date(&self) -> Option<NaiveDate>;

    /// The price before any urgency surcharge.
    fn base_price(&self) -> i64 {
        DEFAULT_BASE_PRICE
    }
}

/// A bare booking record: the read-only input of the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    /// The date the booking consumes a slot.
    pub review_date: Option<NaiveDate>,
    /// When absent, pricing cannot be computed.
    #[serde(default)]
    pub material_received_date: Option<NaiveDate>,
    /// Non-negative base price.
    #[serde(default = "default_base_price")]
    pub base_price: i64,
}

fn default_base_price() -> i64 {
    DEFAULT_BASE_PRICE
}

impl BookingRecord {
    /// Creates a record for a review date with no material date and the default base price.
    pub fn new(review_date: NaiveDate) -> Self {
        Self {
            review_date: Some(review_date),
            material_received_date: None,
            base_price: DEFAULT_BASE_PRICE,
        }
    }

    /// Sets the material-received date.
    pub fn with_material(mut self, material_received_date: NaiveDate) -> Self {
        self.material_received_date = Some(material_received_date);
        self
    }
}

impl Booking for BookingRecord {
    fn review_date(&self) -> Option<NaiveDate> {
        self.review_date
    }

    fn material_received_date(&self) -> Option<NaiveDate> {
        self.material_received_date
    }

    fn base_price(&self) -> i64 {
        self.base_price
    }
}
