//! Cash closure aggregation and reconciliation
//!
//! Pure functions over already-fetched invoices and reference lists.
//! All arithmetic is done in `Decimal`; monetary outputs are reported
//! with two decimal places.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use shared::error::{AppError, ErrorCode};
use shared::models::{
    CashClosureCreate, CashReconciliation, DailySummary, Employee, EmployeeStats, Invoice,
    InvoiceRow, PENDING_METHOD, PaymentMethod, PaymentSummaryEntry, UNKNOWN_EMPLOYEE,
};
use thiserror::Error;

use crate::time;
use crate::validation::{MAX_NOTE_LEN, validate_cash_amount, validate_optional_text};

/// Decimal places for reported amounts
const DECIMAL_PLACES: u32 = 2;

/// Cash closure domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClosureError {
    /// A monetary, date or status value cannot be parsed
    #[error("invalid {field}: {value:?}")]
    Parse { field: String, value: String },

    /// Input is well-formed but not acceptable
    #[error("{field} {message}")]
    Validation { field: String, message: String },

    /// A closure is already recorded for the date
    #[error("a cash closure already exists for {date}")]
    DuplicateClosure { date: NaiveDate },
}

impl ClosureError {
    fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl From<ClosureError> for AppError {
    fn from(e: ClosureError) -> Self {
        let message = e.to_string();
        match e {
            ClosureError::Parse { field, value } => AppError::invalid_format(message)
                .with_detail("field", field)
                .with_detail("value", value),
            ClosureError::Validation { field, .. } => {
                AppError::validation(message).with_detail("field", field)
            }
            ClosureError::DuplicateClosure { date } => {
                AppError::with_message(ErrorCode::CashClosureExists, message)
                    .with_detail("closing_date", date.to_string())
            }
        }
    }
}

/// Round to two places (half away from zero) and fix the scale at two
pub(crate) fn money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DECIMAL_PLACES);
    rounded
}

/// Parse a decimal money string ("140.00").
///
/// Comma separators and exponents are rejected, nothing is coerced to zero.
/// Trailing zeros past the second place are accepted ("12.500"), any other
/// third decimal is not.
pub fn parse_amount(field: &str, raw: &str) -> Result<Decimal, ClosureError> {
    let parse_error = || ClosureError::Parse {
        field: field.to_string(),
        value: raw.to_string(),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.contains(['e', 'E', '_']) {
        return Err(parse_error());
    }
    let value = Decimal::from_str(trimmed).map_err(|_| parse_error())?;
    if value.normalize().scale() > DECIMAL_PLACES {
        return Err(parse_error());
    }
    Ok(value)
}

/// Convert stored rows into invoices, failing on the first unknown status
pub fn invoices_from_rows(rows: Vec<InvoiceRow>) -> Result<Vec<Invoice>, ClosureError> {
    rows.into_iter()
        .map(|row| {
            Invoice::try_from(row).map_err(|e| ClosureError::Parse {
                field: "status".to_string(),
                value: e.0,
            })
        })
        .collect()
}

/// Aggregate the invoices of one business date.
///
/// `invoices` must already be filtered to `date`. Delivered invoices whose
/// payment method is unknown land under [`PENDING_METHOD`]; unknown employees
/// under [`UNKNOWN_EMPLOYEE`]. Revenue is never dropped.
pub fn compute_daily_summary(
    date: NaiveDate,
    invoices: &[Invoice],
    payment_methods: &[PaymentMethod],
    employees: &[Employee],
) -> DailySummary {
    let method_names: HashMap<&str, &str> = payment_methods
        .iter()
        .map(|m| (m.code.as_str(), m.name.as_str()))
        .collect();
    let employee_names: HashMap<&str, &str> = employees
        .iter()
        .map(|e| (e.id.as_str(), e.name.as_str()))
        .collect();

    let mut payment_summary: BTreeMap<String, PaymentSummaryEntry> = payment_methods
        .iter()
        .map(|m| (m.name.clone(), PaymentSummaryEntry::default()))
        .collect();
    payment_summary
        .entry(PENDING_METHOD.to_string())
        .or_default();
    let mut employee_stats: BTreeMap<String, EmployeeStats> = BTreeMap::new();

    let mut delivered_invoices = 0;
    let mut pending_invoices = 0;
    let mut cancelled_invoices = 0;
    let mut total_revenue = Decimal::ZERO;
    let mut total_subtotal = Decimal::ZERO;
    let mut total_tax = Decimal::ZERO;
    let mut pending_total = Decimal::ZERO;

    for invoice in invoices {
        if invoice.is_cancelled() {
            cancelled_invoices += 1;
        }
        if invoice.is_pending() {
            pending_invoices += 1;
            pending_total += invoice.total;
        }
        if !invoice.is_delivered() {
            continue;
        }

        delivered_invoices += 1;
        total_revenue += invoice.total;
        total_subtotal += invoice.subtotal;
        total_tax += invoice.tax;

        let method = invoice
            .payment_method
            .as_deref()
            .and_then(|code| method_names.get(code).copied())
            .unwrap_or(PENDING_METHOD);
        let entry = payment_summary.entry(method.to_string()).or_default();
        entry.quantity += 1;
        entry.total += invoice.total;

        let employee = invoice
            .employee_id
            .as_deref()
            .and_then(|id| employee_names.get(id).copied())
            .unwrap_or(UNKNOWN_EMPLOYEE);
        let stats = employee_stats.entry(employee.to_string()).or_default();
        stats.sales += 1;
        stats.total += invoice.total;
    }

    for entry in payment_summary.values_mut() {
        entry.total = money(entry.total);
    }
    for stats in employee_stats.values_mut() {
        stats.total = money(stats.total);
    }

    DailySummary {
        date,
        total_invoices: invoices.len() as i64,
        delivered_invoices,
        pending_invoices,
        cancelled_invoices,
        total_revenue: money(total_revenue),
        total_subtotal: money(total_subtotal),
        total_tax: money(total_tax),
        pending_total: money(pending_total),
        payment_summary,
        employee_stats,
    }
}

/// Opening cash plus the delivered revenue of the cash method.
///
/// Falls back to `opening_cash` when no method has code `cash`. Saturates at
/// `Decimal::MAX` instead of overflowing.
pub fn system_cash(
    summary: &DailySummary,
    payment_methods: &[PaymentMethod],
    opening_cash: Decimal,
) -> Decimal {
    let cash_revenue = payment_methods
        .iter()
        .find(|m| m.is_cash())
        .and_then(|m| summary.payment_summary.get(&m.name))
        .map(|entry| entry.total)
        .unwrap_or(Decimal::ZERO);
    money(opening_cash.saturating_add(cash_revenue))
}

/// System cash and variance (`counted - system`) for a summary
pub fn reconcile(
    summary: &DailySummary,
    payment_methods: &[PaymentMethod],
    opening_cash: Decimal,
    counted_cash: Decimal,
) -> CashReconciliation {
    let system_cash = system_cash(summary, payment_methods, opening_cash);
    CashReconciliation {
        opening_cash: money(opening_cash),
        system_cash,
        counted_cash: money(counted_cash),
        variance: money(counted_cash.saturating_sub(system_cash)),
    }
}

/// Validated closure request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosureInput {
    pub closing_date: NaiveDate,
    pub opening_cash: Decimal,
    pub counted_cash: Decimal,
    pub notes: Option<String>,
}

impl ClosureInput {
    /// Parse and validate a create payload against the business `today`.
    pub fn from_request(
        payload: &CashClosureCreate,
        today: NaiveDate,
    ) -> Result<Self, ClosureError> {
        let closing_date = time::parse_date("closing_date", &payload.closing_date)?;
        time::validate_not_future("closing_date", closing_date, today)?;

        let opening_cash = match payload.opening_cash.as_deref() {
            Some(raw) => parse_amount("opening_cash", raw)?,
            None => Decimal::ZERO,
        };
        validate_cash_amount(opening_cash, "opening_cash")?;

        let raw_counted = payload
            .counted_cash
            .as_deref()
            .ok_or_else(|| ClosureError::validation("counted_cash", "is required"))?;
        let counted_cash = parse_amount("counted_cash", raw_counted)?;
        validate_cash_amount(counted_cash, "counted_cash")?;

        validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;
        let notes = payload
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(Self {
            closing_date,
            opening_cash,
            counted_cash,
            notes,
        })
    }
}
