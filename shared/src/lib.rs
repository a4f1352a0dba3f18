//! Shared types for the laundry back-office
//!
//! Common types used by the service and its API clients: error codes,
//! response envelopes and the invoice / cash closure data models.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
