//! Configuration loading for the booking service.
//!
//! The service reads its settings from a directory of YAML files: the
//! service listener, the remote sheet endpoint, and the token table used by
//! the static token verifier.
//!
//! # Example
//!
//! ```no_run
//! use commission_booking::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Serving as: {}", config.config().service().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AuthConfig, BookingConfig, ServiceConfig, SheetConfig, TokenEntry};
