//! Booking engine for commissioned-art review slots.
//!
//! This crate prices reviews by urgency, lays out Sunday-start month grids
//! with weekly capacity, and serves both over an HTTP API backed by a remote
//! spreadsheet.

#![warn(missing_docs)]

pub mod api;
pub mod auth;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod sheet;
