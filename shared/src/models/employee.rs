//! Employee Model

use serde::{Deserialize, Serialize};

/// Employee reference entry (id → display name)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: String,
    pub name: String,
}
