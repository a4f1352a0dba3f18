//! Data models
//!
//! Shared between laundry-cloud and the back-office frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! Money is `rust_decimal::Decimal`, serialized as a string.

pub mod cash_closure;
pub mod daily_summary;
pub mod employee;
pub mod invoice;
pub mod payment_method;

// Re-exports
pub use cash_closure::*;
pub use daily_summary::*;
pub use employee::*;
pub use invoice::*;
pub use payment_method::*;
