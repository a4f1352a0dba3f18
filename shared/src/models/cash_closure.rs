//! Cash Closure Model (cierre de caja)

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment method breakdown (independent table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ClosurePaymentBreakdown {
    pub id: i64,
    pub closure_id: i64,
    /// Payment method display name (or "Pendiente")
    pub method_name: String,
    pub quantity: i64,
    pub total: Decimal,
}

/// Employee breakdown (independent table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ClosureEmployeeBreakdown {
    pub id: i64,
    pub closure_id: i64,
    /// Employee display name (or "Desconocido")
    pub employee_name: String,
    pub sales: i64,
    pub total: Decimal,
}

/// Cash Closure - end-of-day drawer reconciliation snapshot, one per date
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CashClosure {
    pub id: i64,
    pub closing_date: NaiveDate,
    pub opening_cash: Decimal,
    pub counted_cash: Decimal,
    pub system_cash: Decimal,
    pub variance: Decimal,
    pub total_invoices: i64,
    pub delivered_invoices: i64,
    pub pending_invoices: i64,
    pub cancelled_invoices: i64,
    pub total_revenue: Decimal,
    pub total_subtotal: Decimal,
    pub total_tax: Decimal,
    pub pending_total: Decimal,
    pub notes: Option<String>,
    /// When the closure was recorded (Unix millis)
    pub created_at: i64,

    // -- Relations (populated by application code, skipped by FromRow) --
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub payment_breakdowns: Vec<ClosurePaymentBreakdown>,
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub employee_breakdowns: Vec<ClosureEmployeeBreakdown>,
}

/// Create cash closure payload
///
/// Amounts are decimal strings ("140.00"); the date is YYYY-MM-DD.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CashClosureCreate {
    pub closing_date: String,
    /// Float left in the drawer at opening (default 0)
    pub opening_cash: Option<String>,
    /// Cash physically counted by the operator
    pub counted_cash: Option<String>,
    pub notes: Option<String>,
}
