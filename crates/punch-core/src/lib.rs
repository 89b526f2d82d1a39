//! Core library for Punch, a terminal client for the attendance
//! tracker backend.
//!
//! Owns everything that is not presentation: the persisted session
//! store, JWT claims peeking, the authenticated API client, admin
//! payload building, and spreadsheet export.

pub mod admin;
pub mod api;
pub mod error;
pub mod export;
pub mod session;
pub mod store;
pub mod token;

pub use error::{Error, Result};
