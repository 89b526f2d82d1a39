//! Attendance backend REST API.

pub mod client;
pub mod query;
pub mod types;

pub use client::ApiClient;
pub use query::LogFilter;
