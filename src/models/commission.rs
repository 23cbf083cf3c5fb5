//! Commission records and their normalization from sheet rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::{quote, week_start_of};

use super::booking::{Booking, DEFAULT_BASE_PRICE, PriceTier};
use super::raw::{
    RawCommissionRow, normalize_date, parse_amount, parse_integer, parse_text,
};

/// Where a commission is in the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommissionStatus {
    /// Deposit received; the default for unknown tokens.
    Paid,
    /// The client has asked for the review.
    ReviewRequested,
    /// Reviewed and closed.
    Done,
}

impl CommissionStatus {
    /// Parses a status token, treating anything unrecognised as `Paid`.
    pub fn from_str_lossy(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "REVIEW_REQUESTED" => CommissionStatus::ReviewRequested,
            "DONE" => CommissionStatus::Done,
            _ => CommissionStatus::Paid,
        }
    }

    /// The wire token for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommissionStatus::Paid => "PAID",
            CommissionStatus::ReviewRequested => "REVIEW_REQUESTED",
            CommissionStatus::Done => "DONE",
        }
    }
}

/// A commission as the rest of the engine sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commission {
    /// Sheet id, or `row-{index}` when the sheet has none.
    pub id: String,
    /// Client nickname.
    pub client_name: String,
    /// Name on the deposit; may be empty.
    pub depositor_name: String,
    /// Workflow status.
    pub status: CommissionStatus,
    /// Date the material arrived, if it has.
    pub material_received_date: Option<NaiveDate>,
    /// The review slot date.
    pub review_date: NaiveDate,
    /// Sunday of the review week, always derived from `review_date`.
    pub week_start: NaiveDate,
    /// Slot position inside the week.
    pub slot_index: i64,
    /// Price before surcharge.
    pub base_price: i64,
    /// Tier stored in the sheet, else computed, else `Pending`.
    pub price_tier: PriceTier,
    /// Price including surcharge.
    pub final_price: i64,
    /// Days between material and review, when known.
    pub diff_days: Option<i64>,
    /// Urgency surcharge.
    pub extra_price: i64,
    /// Free-form note.
    pub memo: Option<String>,
    /// Creation timestamp as written by the sheet.
    pub created_at: Option<String>,
}

impl Commission {
    /// Normalizes a sheet row. Returns `None` for rows without a client name or review date.
    ///
    /// Pricing fields stored in the sheet take precedence; otherwise they are
    /// derived from the two dates, and when the material date is missing the
    /// tier is `Pending` and the final price is the base price.
    ///
    /// # Example
    ///
    /// ```
    /// use commission_booking::models::{Commission, PriceTier, RawCommissionRow};
    /// use serde_json::json;
    ///
    /// let row: RawCommissionRow = serde_json::from_value(json!({
    ///     "clientName": "kim",
    ///     "materialReceivedDate": "2025-12-01",
    ///     "reviewDate": "2025-12-04"
    /// })).unwrap();
    ///
    /// let commission = Commission::from_raw(&row, 0).unwrap();
    /// assert_eq!(commission.id, "row-0");
    /// assert_eq!(commission.price_tier, PriceTier::Rush);
    /// assert_eq!(commission.final_price, 100_000);
    /// ```
    pub fn from_raw(row: &RawCommissionRow, index: usize) -> Option<Self> {
        let material_received_date = normalize_date(row.material_received_date.as_ref());
        let review_date = normalize_date(row.review_date.as_ref())?;
        let client_name = parse_text(row.client_name.as_ref())?;

        let id = parse_text(row.id.as_ref()).unwrap_or_else(|| format!("row-{index}"));
        let base_price = parse_amount(row.base_price.as_ref(), DEFAULT_BASE_PRICE);

        let auto = material_received_date
            .map(|material| quote(Some(material), Some(review_date), base_price));

        let diff_days = parse_integer(row.diff_days.as_ref())
            .or_else(|| auto.as_ref().and_then(|q| q.diff_days));

        let price_tier = parse_text(row.price_tier.as_ref())
            .map(|token| PriceTier::from_str_lossy(&token))
            .or_else(|| auto.as_ref().map(|q| q.price_tier))
            .unwrap_or(PriceTier::Pending);

        let final_price = parse_amount(
            row.final_price.as_ref(),
            auto.as_ref().map_or(base_price, |q| q.final_price),
        );
        let extra_price = parse_amount(
            row.extra_price.as_ref(),
            auto.as_ref().map_or(0, |q| q.extra_price),
        );

        let status = parse_text(row.status.as_ref())
            .map(|token| CommissionStatus::from_str_lossy(&token))
            .unwrap_or(CommissionStatus::Paid);

        Some(Commission {
            id,
            client_name,
            depositor_name: parse_text(row.depositor_name.as_ref()).unwrap_or_default(),
            status,
            material_received_date,
            review_date,
            week_start: week_start_of(review_date),
            slot_index: parse_amount(row.slot_index.as_ref(), 0),
            base_price,
            price_tier,
            final_price,
            diff_days,
            extra_price,
            memo: parse_text(row.memo.as_ref()),
            created_at: parse_text(row.created_at.as_ref()),
        })
    }
}

impl Booking for Commission {
    fn review_date(&self) -> Option<NaiveDate> {
        Some(self.review_date)
    }

    fn material_received_date(&self) -> Option<NaiveDate> {
        self.material_received_date
    }

    fn base_price(&self) -> i64 {
        self.base_price
    }
}
