//! Payment Method Model

use serde::{Deserialize, Serialize};

/// Code of the payment method whose revenue ends up in the cash drawer
pub const CASH_METHOD_CODE: &str = "cash";

/// Payment method reference entry (code → display name)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PaymentMethod {
    /// Stable code stored on invoices ("cash", "card", ...)
    pub code: String,
    /// Display name used as the summary key ("Efectivo", "Tarjeta", ...)
    pub name: String,
}

impl PaymentMethod {
    pub fn is_cash(&self) -> bool {
        self.code == CASH_METHOD_CODE
    }
}
