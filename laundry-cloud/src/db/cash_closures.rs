//! Cash closure database operations
//!
//! A closure row is written once per `closing_date` together with its
//! breakdown rows, inside one transaction. There is no update path.

use chrono::NaiveDate;
use shared::models::{
    CashClosure, CashReconciliation, ClosureEmployeeBreakdown, ClosurePaymentBreakdown,
    DailySummary,
};
use sqlx::PgPool;

/// Insert a closure snapshot and its breakdowns.
///
/// Returns `None` without writing anything when a closure for
/// `summary.date` already exists.
pub async fn create(
    pool: &PgPool,
    summary: &DailySummary,
    reconciliation: &CashReconciliation,
    notes: Option<&str>,
    now: i64,
) -> Result<Option<CashClosure>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let inserted: Option<CashClosure> = sqlx::query_as(
        r#"
        INSERT INTO cash_closures (
            closing_date, opening_cash, counted_cash, system_cash, variance,
            total_invoices, delivered_invoices, pending_invoices, cancelled_invoices,
            total_revenue, total_subtotal, total_tax, pending_total,
            notes, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        ON CONFLICT (closing_date) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(summary.date)
    .bind(reconciliation.opening_cash)
    .bind(reconciliation.counted_cash)
    .bind(reconciliation.system_cash)
    .bind(reconciliation.variance)
    .bind(summary.total_invoices)
    .bind(summary.delivered_invoices)
    .bind(summary.pending_invoices)
    .bind(summary.cancelled_invoices)
    .bind(summary.total_revenue)
    .bind(summary.total_subtotal)
    .bind(summary.total_tax)
    .bind(summary.pending_total)
    .bind(notes)
    .bind(now)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(mut closure) = inserted else {
        tx.rollback().await?;
        return Ok(None);
    };

    for (method_name, entry) in &summary.payment_summary {
        let row: ClosurePaymentBreakdown = sqlx::query_as(
            r#"
            INSERT INTO cash_closure_payment_breakdown (closure_id, method_name, quantity, total)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(closure.id)
        .bind(method_name)
        .bind(entry.quantity)
        .bind(entry.total)
        .fetch_one(&mut *tx)
        .await?;
        closure.payment_breakdowns.push(row);
    }

    for (employee_name, stats) in &summary.employee_stats {
        let row: ClosureEmployeeBreakdown = sqlx::query_as(
            r#"
            INSERT INTO cash_closure_employee_breakdown (closure_id, employee_name, sales, total)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(closure.id)
        .bind(employee_name)
        .bind(stats.sales)
        .bind(stats.total)
        .fetch_one(&mut *tx)
        .await?;
        closure.employee_breakdowns.push(row);
    }

    tx.commit().await?;
    Ok(Some(closure))
}

/// Closure for a date, with both breakdowns loaded
pub async fn find_by_date(
    pool: &PgPool,
    closing_date: NaiveDate,
) -> Result<Option<CashClosure>, sqlx::Error> {
    let closure: Option<CashClosure> =
        sqlx::query_as("SELECT * FROM cash_closures WHERE closing_date = $1")
            .bind(closing_date)
            .fetch_optional(pool)
            .await?;

    let Some(mut closure) = closure else {
        return Ok(None);
    };

    closure.payment_breakdowns = sqlx::query_as(
        "SELECT * FROM cash_closure_payment_breakdown WHERE closure_id = $1 ORDER BY method_name",
    )
    .bind(closure.id)
    .fetch_all(pool)
    .await?;

    closure.employee_breakdowns = sqlx::query_as(
        "SELECT * FROM cash_closure_employee_breakdown WHERE closure_id = $1 ORDER BY employee_name",
    )
    .bind(closure.id)
    .fetch_all(pool)
    .await?;

    Ok(Some(closure))
}

/// Closures within optional inclusive date bounds, newest first (breakdowns not loaded)
pub async fn list(
    pool: &PgPool,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    limit: i64,
    offset: i64,
) -> Result<Vec<CashClosure>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT * FROM cash_closures
        WHERE ($1::date IS NULL OR closing_date >= $1)
          AND ($2::date IS NULL OR closing_date <= $2)
        ORDER BY closing_date DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(from)
    .bind(to)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}
