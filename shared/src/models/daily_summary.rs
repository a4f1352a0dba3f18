//! Daily Summary Model (derived per business date, never stored on its own)

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary key for delivered invoices whose payment method cannot be resolved
pub const PENDING_METHOD: &str = "Pendiente";

/// Summary key for delivered invoices whose employee cannot be resolved
pub const UNKNOWN_EMPLOYEE: &str = "Desconocido";

/// Per payment method aggregate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummaryEntry {
    pub quantity: i64,
    pub total: Decimal,
}

/// Per employee aggregate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeStats {
    pub sales: i64,
    pub total: Decimal,
}

/// Aggregates over the invoices of one business date.
///
/// Revenue totals and both maps only count delivered invoices
/// (status `delivered` and paid). Maps are keyed by display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_invoices: i64,
    pub delivered_invoices: i64,
    pub pending_invoices: i64,
    pub cancelled_invoices: i64,
    pub total_revenue: Decimal,
    pub total_subtotal: Decimal,
    pub total_tax: Decimal,
    /// Sum of totals still owed by pending invoices
    pub pending_total: Decimal,
    pub payment_summary: BTreeMap<String, PaymentSummaryEntry>,
    pub employee_stats: BTreeMap<String, EmployeeStats>,
}

/// Drawer reconciliation for a closure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashReconciliation {
    pub opening_cash: Decimal,
    /// Opening cash plus cash-method revenue
    pub system_cash: Decimal,
    pub counted_cash: Decimal,
    /// counted_cash - system_cash (negative when the drawer is short)
    pub variance: Decimal,
}

/// Summary preview returned before closing the day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummaryPreview {
    #[serde(flatten)]
    pub summary: DailySummary,
    pub opening_cash: Decimal,
    pub system_cash: Decimal,
}
