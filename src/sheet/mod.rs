//! Access to the remote spreadsheet that stores commissions and notices.
//!
//! One endpoint serves every sheet. Reads return a JSON array of raw rows;
//! writes are form-encoded and answer with `{ ok, id, error, message }`.
//! [`SheetRepository`] layers normalization and a [`RecordCache`] on top of
//! any [`SheetClient`].

mod cache;
mod client;
mod repository;

use serde::Deserialize;

use crate::error::{BookingError, BookingResult};
use crate::models::FormField;

pub use cache::RecordCache;
pub use client::{HttpSheetClient, SheetClient};
pub use repository::SheetRepository;

/// The sheets the endpoint exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetName {
    /// Commission rows.
    Commission,
    /// Notice rows.
    Notices,
}

impl SheetName {
    /// The value of the `sheet` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SheetName::Commission => "commission",
            SheetName::Notices => "notices",
        }
    }
}

impl std::fmt::Display for SheetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a write does to the target row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Append a new row.
    Create,
    /// Replace the fields of an existing row.
    Update,
    /// Remove a row.
    Delete,
}

impl WriteMode {
    /// The value of the `mode` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteMode::Create => "create",
            WriteMode::Update => "update",
            WriteMode::Delete => "delete",
        }
    }
}

/// A write sent to the sheet endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRequest {
    /// Create, update or delete.
    pub mode: WriteMode,
    /// Target row id; absent for creates.
    pub id: Option<String>,
    /// The caller's identity token, checked by the endpoint itself.
    pub id_token: String,
    /// Payload fields.
    pub fields: Vec<FormField>,
}

impl WriteRequest {
    /// A create carrying `fields`.
    pub fn create(id_token: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self {
            mode: WriteMode::Create,
            id: None,
            id_token: id_token.into(),
            fields,
        }
    }

    /// An update of row `id` carrying `fields`.
    pub fn update(id: impl Into<String>, id_token: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self {
            mode: WriteMode::Update,
            id: Some(id.into()),
            id_token: id_token.into(),
            fields,
        }
    }

    /// A delete of row `id`.
    pub fn delete(id: impl Into<String>, id_token: impl Into<String>) -> Self {
        Self {
            mode: WriteMode::Delete,
            id: Some(id.into()),
            id_token: id_token.into(),
            fields: Vec::new(),
        }
    }

    /// The full form body: `mode`, `id` when present, `idToken`, then the payload.
    pub fn form_pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs = vec![("mode", self.mode.as_str())];
        if let Some(id) = &self.id {
            pairs.push(("id", id.as_str()));
        }
        pairs.push(("idToken", self.id_token.as_str()));
        pairs.extend(self.fields.iter().map(|(name, value)| (*name, value.as_str())));
        pairs
    }
}

/// The endpoint's answer to a write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WriteResponse {
    /// Whether the endpoint applied the write.
    pub ok: bool,
    /// Id of the affected row.
    pub id: Option<String>,
    /// Short error code.
    pub error: Option<String>,
    /// Human-readable detail.
    pub message: Option<String>,
}

impl WriteResponse {
    /// `error` and `message` merged into one line.
    ///
    /// # Example
    ///
    /// ```
    /// use commission_booking::sheet::WriteResponse;
    ///
    /// let both = WriteResponse {
    ///     error: Some("FORBIDDEN".into()),
    ///     message: Some("not an admin".into()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(both.merged_error(), "FORBIDDEN: not an admin");
    /// assert_eq!(WriteResponse::default().merged_error(), "Unknown error");
    /// ```
    pub fn merged_error(&self) -> String {
        let error = self.error.as_deref().filter(|s| !s.is_empty());
        let message = self.message.as_deref().filter(|s| !s.is_empty());

        match (error, message) {
            (Some(error), Some(message)) => format!("{}: {}", error, message),
            (Some(only), None) | (None, Some(only)) => only.to_string(),
            (None, None) => "Unknown error".to_string(),
        }
    }

    /// The affected row id, or the merged error when the write was not applied.
    ///
    /// A write only counts as applied when `ok` is set and an id came back.
    pub fn into_result(self) -> BookingResult<String> {
        match (self.ok, &self.id) {
            (true, Some(id)) if !id.is_empty() => Ok(id.clone()),
            _ => Err(BookingError::Upstream {
                message: self.merged_error(),
            }),
        }
    }
}
