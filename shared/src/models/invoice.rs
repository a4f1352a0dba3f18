//! Invoice Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Invoice workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Received,
    InProcess,
    Ready,
    Delivered,
    Cancelled,
}

impl InvoiceStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::InProcess => "in_process",
            Self::Ready => "ready",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status string that is not one of the known invoice states
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown invoice status: {0}")]
pub struct UnknownInvoiceStatus(pub String);

impl FromStr for InvoiceStatus {
    type Err = UnknownInvoiceStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "received" => Ok(Self::Received),
            "in_process" => Ok(Self::InProcess),
            "ready" => Ok(Self::Ready),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownInvoiceStatus(other.to_string())),
        }
    }
}

/// Invoice as consumed by the cash closure aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    /// Invoice timestamp (Unix millis)
    pub date: i64,
    pub status: InvoiceStatus,
    pub paid: bool,
    /// Payment method code, absent while unpaid
    pub payment_method: Option<String>,
    /// Employee who registered the invoice
    pub employee_id: Option<String>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl Invoice {
    /// Delivered and paid: counted toward revenue
    pub fn is_delivered(&self) -> bool {
        self.status == InvoiceStatus::Delivered && self.paid
    }

    /// Unpaid and not cancelled: owed but not yet collected
    pub fn is_pending(&self) -> bool {
        !self.paid && self.status != InvoiceStatus::Cancelled
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == InvoiceStatus::Cancelled
    }
}

/// Raw invoice row; `status` is validated when converting into [`Invoice`]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InvoiceRow {
    pub id: i64,
    pub date: i64,
    pub status: String,
    pub paid: bool,
    pub payment_method: Option<String>,
    pub employee_id: Option<String>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl TryFrom<InvoiceRow> for Invoice {
    type Error = UnknownInvoiceStatus;

    fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            date: row.date,
            status: row.status.parse()?,
            paid: row.paid,
            payment_method: row.payment_method,
            employee_id: row.employee_id,
            subtotal: row.subtotal,
            tax: row.tax,
            total: row.total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(units: i64) -> Decimal {
        Decimal::new(units, 2)
    }

    fn row(status: &str, paid: bool) -> InvoiceRow {
        InvoiceRow {
            id: 1,
            date: 1_760_000_000_000,
            status: status.to_string(),
            paid,
            payment_method: Some("cash".to_string()),
            employee_id: Some("e1".to_string()),
            subtotal: cents(2066),
            tax: cents(434),
            total: cents(2500),
        }
    }

    #[test]
    fn test_status_round_trip_through_str() {
        for status in [
            InvoiceStatus::Received,
            InvoiceStatus::InProcess,
            InvoiceStatus::Ready,
            InvoiceStatus::Delivered,
            InvoiceStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<InvoiceStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_status_serde_snake_case() {
        let json = serde_json::to_string(&InvoiceStatus::InProcess).unwrap();
        assert_eq!(json, "\"in_process\"");
    }

    #[test]
    fn test_unknown_status_rejected() {
        let err = "lost".parse::<InvoiceStatus>().unwrap_err();
        assert_eq!(err, UnknownInvoiceStatus("lost".to_string()));
        assert!(Invoice::try_from(row("Delivered", true)).is_err());
    }

    #[test]
    fn test_classification() {
        let delivered = Invoice::try_from(row("delivered", true)).unwrap();
        assert!(delivered.is_delivered());
        assert!(!delivered.is_pending());

        let ready_unpaid = Invoice::try_from(row("ready", false)).unwrap();
        assert!(!ready_unpaid.is_delivered());
        assert!(ready_unpaid.is_pending());

        let cancelled = Invoice::try_from(row("cancelled", false)).unwrap();
        assert!(cancelled.is_cancelled());
        assert!(!cancelled.is_pending());

        // delivered but never collected stays pending
        let delivered_unpaid = Invoice::try_from(row("delivered", false)).unwrap();
        assert!(!delivered_unpaid.is_delivered());
        assert!(delivered_unpaid.is_pending());
    }
}
