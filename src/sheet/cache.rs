//! Short-lived cache of normalized sheet records.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use crate::models::{Commission, Notice};

use super::SheetName;

/// Normalized records per sheet, each list expiring after a fixed TTL.
///
/// Each sheet is cached as a single entry, so a write to one sheet only has
/// to drop that entry. Cloning shares the underlying storage.
#[derive(Clone)]
pub struct RecordCache {
    commissions: Cache<(), Arc<Vec<Commission>>>,
    notices: Cache<(), Arc<Vec<Notice>>>,
}

impl RecordCache {
    /// Creates an empty cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            commissions: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
            notices: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
        }
    }

    /// Cached commissions, if still fresh.
    pub async fn commissions(&self) -> Option<Arc<Vec<Commission>>> {
        self.commissions.get(&()).await
    }

    /// Replaces the cached commissions.
    pub async fn store_commissions(&self, records: Arc<Vec<Commission>>) {
        self.commissions.insert((), records).await;
    }

    /// Cached notices, if still fresh.
    pub async fn notices(&self) -> Option<Arc<Vec<Notice>>> {
        self.notices.get(&()).await
    }

    /// Replaces the cached notices.
    pub async fn store_notices(&self, records: Arc<Vec<Notice>>) {
        self.notices.insert((), records).await;
    }

    /// Drops the entry for one sheet.
    pub async fn invalidate(&self, sheet: SheetName) {
        match sheet {
            SheetName::Commission => self.commissions.invalidate(&()).await,
            SheetName::Notices => self.notices.invalidate(&()).await,
        }
        debug!(sheet = %sheet, "Record cache invalidated");
    }
}
