//! Write payloads sent to the sheet endpoint.
//!
//! The endpoint takes form-encoded fields named in camelCase. Commission
//! writes carry the computed pricing as well, so the sheet stores the same
//! figures the engine would derive at read time.

use chrono::NaiveDate;

use crate::calculation::{quote, week_start_of};
use crate::error::{BookingError, BookingResult};

use super::booking::{DEFAULT_BASE_PRICE, MAX_BASE_PRICE, PriceTier};
use super::commission::CommissionStatus;
use super::raw::DATE_KEY_FORMAT;

/// One form field: wire name and value.
pub type FormField = (&'static str, String);

/// A commission to create, or the full replacement of one being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCommission {
    /// Client nickname (required).
    pub client_name: String,
    /// Name on the deposit.
    pub depositor_name: String,
    /// Workflow status.
    pub status: CommissionStatus,
    /// Review slot date (required).
    pub review_date: NaiveDate,
    /// Material date, when already received.
    pub material_received_date: Option<NaiveDate>,
    /// Free-form note; `None` clears the stored one.
    pub memo: Option<String>,
    /// Base price. `None` means the default on create; the repository fills
    /// in the stored price before an update.
    pub base_price: Option<i64>,
}

impl NewCommission {
    /// Rejects blank client names and out-of-range base prices.
    pub fn validate(&self) -> BookingResult<()> {
        if self.client_name.trim().is_empty() {
            return Err(BookingError::MissingField {
                field: "client_name".to_string(),
            });
        }
        if let Some(amount) = self.base_price.filter(|a| !(0..=MAX_BASE_PRICE).contains(a)) {
            return Err(BookingError::InvalidAmount {
                field: "base_price".to_string(),
                value: amount,
            });
        }
        Ok(())
    }

    /// Form fields including the computed pricing and week start.
    ///
    /// Without a material date the tier is `PENDING`, the surcharge is zero
    /// and `diffDays` is sent blank. The material date and `memo` are always
    /// sent, blank when absent, so an update can clear them.
    pub fn form_fields(&self) -> Vec<FormField> {
        let base_price = self.base_price.unwrap_or(DEFAULT_BASE_PRICE);
        let priced = self
            .material_received_date
            .map(|material| quote(Some(material), Some(self.review_date), base_price));

        let (diff_days, tier, final_price, extra_price) = match priced {
            Some(q) => (
                q.diff_days.map(|d| d.to_string()).unwrap_or_default(),
                q.price_tier,
                q.final_price,
                q.extra_price,
            ),
            None => (String::new(), PriceTier::Pending, base_price, 0),
        };

        vec![
            ("clientName", self.client_name.trim().to_string()),
            ("depositorName", self.depositor_name.trim().to_string()),
            ("status", self.status.as_str().to_string()),
            ("reviewDate", self.review_date.format(DATE_KEY_FORMAT).to_string()),
            (
                "weekStart",
                week_start_of(self.review_date)
                    .format(DATE_KEY_FORMAT)
                    .to_string(),
            ),
            ("basePrice", base_price.to_string()),
            ("priceTier", tier.as_str().to_string()),
            ("diffDays", diff_days),
            ("extraPrice", extra_price.to_string()),
            ("finalPrice", final_price.to_string()),
            (
                "materialReceivedDate",
                self.material_received_date
                    .map(|material| material.format(DATE_KEY_FORMAT).to_string())
                    .unwrap_or_default(),
            ),
            ("memo", self.memo.clone().unwrap_or_default()),
        ]
    }
}

/// A notice to create, or the full replacement of one being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotice {
    /// Title line (required).
    pub title: String,
    /// Rich-text body (required).
    pub body: String,
    /// Pin to the top of listings.
    pub is_pinned: bool,
    /// Show publicly.
    pub is_active: bool,
}

impl NewNotice {
    /// Rejects blank titles and bodies.
    pub fn validate(&self) -> BookingResult<()> {
        if self.title.trim().is_empty() {
            return Err(BookingError::MissingField {
                field: "title".to_string(),
            });
        }
        if self.body.trim().is_empty() {
            return Err(BookingError::MissingField {
                field: "body".to_string(),
            });
        }
        Ok(())
    }

    /// Form fields in the sheet's naming.
    pub fn form_fields(&self) -> Vec<FormField> {
        vec![
            ("title", self.title.clone()),
            ("body", self.body.clone()),
            ("isPinned", self.is_pinned.to_string()),
            ("isActive", self.is_active.to_string()),
        ]
    }
}
