//! Error types for the commission booking engine.
//!
//! The pricing and calendar core never fails: bad dates degrade to defined
//! fallbacks. Everything around it (configuration, payload validation, the
//! sheet endpoint, authorization) reports through [`BookingError`].

use thiserror::Error;

/// The main error type for the booking engine.
///
/// # Example
///
/// ```
/// use commission_booking::error::BookingError;
///
/// let error = BookingError::ConfigNotFound {
///     path: "/missing/sheet.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/sheet.yaml");
/// ```
#[derive(Debug, Error)]
pub enum BookingError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A required field was missing or blank in a write payload.
    #[error("Missing required field '{field}'")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// A date field did not hold a `YYYY-MM-DD` value.
    #[error("Invalid date for '{field}': {value}")]
    InvalidDate {
        /// The name of the field.
        field: String,
        /// The rejected value.
        value: String,
    },

    /// A money amount was negative or above the accepted ceiling.
    #[error("Amount out of range for '{field}': {value}")]
    InvalidAmount {
        /// The name of the field.
        field: String,
        /// The rejected amount.
        value: i64,
    },

    /// The request carried no usable bearer token.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Why the token was rejected.
        message: String,
    },

    /// The caller is authenticated but lacks the admin claim.
    #[error("Forbidden: admin claim required for '{uid}'")]
    Forbidden {
        /// The authenticated user id.
        uid: String,
    },

    /// A commission or notice with the given id does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// The entity kind ("commission" or "notice").
        kind: &'static str,
        /// The id that was looked up.
        id: String,
    },

    /// The remote sheet endpoint failed or rejected the request.
    #[error("Sheet endpoint error: {message}")]
    Upstream {
        /// A description of the failure, including any merged endpoint error.
        message: String,
    },
}

/// A type alias for Results that return BookingError.
pub type BookingResult<T> = Result<T, BookingError>;

impl From<reqwest::Error> for BookingError {
    fn from(err: reqwest::Error) -> Self {
        let message = match err.status() {
            Some(status) => format!("HTTP {}", status.as_u16()),
            None if err.is_timeout() => "request timed out".to_string(),
            None => err.to_string(),
        };
        BookingError::Upstream { message }
    }
}
