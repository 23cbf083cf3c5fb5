//! Application state for the booking API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::auth::{StaticTokenVerifier, TokenVerifier};
use crate::config::ConfigLoader;
use crate::error::BookingResult;
use crate::sheet::{HttpSheetClient, RecordCache, SheetRepository};

/// Source of the current local time.
pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// Shared application state.
///
/// Contains the configuration, the sheet repository with its cache, the
/// token verifier, and the clock handlers read "today" from.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    repository: SheetRepository,
    verifier: Arc<dyn TokenVerifier>,
    clock: Clock,
}

impl AppState {
    /// Creates a state from explicit parts, reading time from the local clock.
    pub fn new(
        config: ConfigLoader,
        repository: SheetRepository,
        verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            repository,
            verifier,
            clock: Arc::new(|| Local::now().naive_local()),
        }
    }

    /// Wires the HTTP sheet client, the record cache and the static verifier
    /// from configuration.
    pub fn from_config(config: ConfigLoader) -> BookingResult<Self> {
        let sheet = config.config().sheet();
        let client = HttpSheetClient::new(sheet)?;
        let repository = SheetRepository::new(Arc::new(client), RecordCache::new(sheet.cache_ttl()));
        let verifier = StaticTokenVerifier::from_config(config.config().auth());

        Ok(Self::new(config, repository, Arc::new(verifier)))
    }

    /// Replaces the clock.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> NaiveDateTime + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// The sheet repository.
    pub fn repository(&self) -> &SheetRepository {
        &self.repository
    }

    /// The token verifier.
    pub fn verifier(&self) -> &dyn TokenVerifier {
        self.verifier.as_ref()
    }

    /// The current local time.
    pub fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    /// The current local date.
    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }
}
