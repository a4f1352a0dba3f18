//! Database access layer
//!
//! Repositories take `&PgPool` and plain values (dates as `NaiveDate`,
//! instants as Unix millis) and return `sqlx::Error`.

pub mod cash_closures;
pub mod employees;
pub mod invoices;
pub mod payment_methods;
