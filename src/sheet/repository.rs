//! Typed, cached access to commissions and notices.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{BookingError, BookingResult};
use crate::models::{
    Commission, NewCommission, NewNotice, Notice, RawCommissionRow, RawNoticeRow,
    sort_newest_first,
};

use super::{RecordCache, SheetClient, SheetName, WriteRequest};

/// Reads go through the cache; successful writes drop the affected sheet.
#[derive(Clone)]
pub struct SheetRepository {
    client: Arc<dyn SheetClient>,
    cache: RecordCache,
}

/// Deserializes each row, skipping (and logging) rows that are not objects.
fn decode_rows<T: DeserializeOwned>(sheet: SheetName, rows: Vec<Value>) -> Vec<(usize, T)> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value::<T>(row) {
            Ok(raw) => Some((index, raw)),
            Err(err) => {
                warn!(sheet = %sheet, index, error = %err, "Skipping malformed row");
                None
            }
        })
        .collect()
}

impl SheetRepository {
    /// Wraps a client and a cache.
    pub fn new(client: Arc<dyn SheetClient>, cache: RecordCache) -> Self {
        Self { client, cache }
    }

    /// All valid commissions, in sheet order.
    pub async fn commissions(&self) -> BookingResult<Arc<Vec<Commission>>> {
        if let Some(cached) = self.cache.commissions().await {
            debug!(count = cached.len(), "Commissions served from cache");
            return Ok(cached);
        }

        let rows = self.client.fetch_rows(SheetName::Commission).await?;
        let total = rows.len();
        let records: Vec<Commission> = decode_rows::<RawCommissionRow>(SheetName::Commission, rows)
            .iter()
            .filter_map(|(index, raw)| Commission::from_raw(raw, *index))
            .collect();

        info!(rows = total, kept = records.len(), "Commissions loaded");

        let records = Arc::new(records);
        self.cache.store_commissions(Arc::clone(&records)).await;
        Ok(records)
    }

    /// All valid notices, newest first.
    pub async fn notices(&self) -> BookingResult<Arc<Vec<Notice>>> {
        if let Some(cached) = self.cache.notices().await {
            debug!(count = cached.len(), "Notices served from cache");
            return Ok(cached);
        }

        let rows = self.client.fetch_rows(SheetName::Notices).await?;
        let total = rows.len();
        let mut records: Vec<Notice> = decode_rows::<RawNoticeRow>(SheetName::Notices, rows)
            .iter()
            .filter_map(|(index, raw)| Notice::from_raw(raw, *index))
            .collect();
        sort_newest_first(&mut records);

        info!(rows = total, kept = records.len(), "Notices loaded");

        let records = Arc::new(records);
        self.cache.store_notices(Arc::clone(&records)).await;
        Ok(records)
    }

    /// One commission by id.
    pub async fn find_commission(&self, id: &str) -> BookingResult<Commission> {
        self.commissions()
            .await?
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| BookingError::NotFound {
                kind: "commission",
                id: id.to_string(),
            })
    }

    /// One notice by id, active or not.
    pub async fn find_notice(&self, id: &str) -> BookingResult<Notice> {
        self.notices()
            .await?
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or_else(|| BookingError::NotFound {
                kind: "notice",
                id: id.to_string(),
            })
    }

    /// Validates and appends a commission. Returns the new row id.
    pub async fn create_commission(
        &self,
        payload: &NewCommission,
        id_token: &str,
    ) -> BookingResult<String> {
        payload.validate()?;
        let request = WriteRequest::create(id_token, payload.form_fields());
        self.write(SheetName::Commission, request).await
    }

    /// Validates and replaces commission `id`.
    ///
    /// A payload without a base price keeps the stored one, so pricing is
    /// recomputed from what the row was booked at.
    pub async fn update_commission(
        &self,
        id: &str,
        payload: &NewCommission,
        id_token: &str,
    ) -> BookingResult<String> {
        payload.validate()?;

        let mut payload = payload.clone();
        if payload.base_price.is_none() {
            payload.base_price = Some(self.find_commission(id).await?.base_price);
        }

        let request = WriteRequest::update(id, id_token, payload.form_fields());
        self.write(SheetName::Commission, request).await
    }

    /// Validates and appends a notice. Returns the new row id.
    pub async fn create_notice(&self, payload: &NewNotice, id_token: &str) -> BookingResult<String> {
        payload.validate()?;
        let request = WriteRequest::create(id_token, payload.form_fields());
        self.write(SheetName::Notices, request).await
    }

    /// Validates and replaces notice `id`.
    pub async fn update_notice(
        &self,
        id: &str,
        payload: &NewNotice,
        id_token: &str,
    ) -> BookingResult<String> {
        payload.validate()?;
        let request = WriteRequest::update(id, id_token, payload.form_fields());
        self.write(SheetName::Notices, request).await
    }

    /// Removes notice `id`.
    pub async fn delete_notice(&self, id: &str, id_token: &str) -> BookingResult<String> {
        self.write(SheetName::Notices, WriteRequest::delete(id, id_token))
            .await
    }

    async fn write(&self, sheet: SheetName, request: WriteRequest) -> BookingResult<String> {
        let mode = request.mode;
        let id = self.client.submit(sheet, request).await?.into_result()?;

        self.cache.invalidate(sheet).await;
        info!(sheet = %sheet, mode = mode.as_str(), id = %id, "Sheet write applied");
        Ok(id)
    }
}
