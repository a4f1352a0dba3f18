use shared::models::InvoiceRow;
use sqlx::PgPool;

/// Invoices with `start <= date < end` (Unix millis), oldest first
pub async fn list_for_range(
    pool: &PgPool,
    start: i64,
    end: i64,
) -> Result<Vec<InvoiceRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, date, status, paid, payment_method, employee_id, subtotal, tax, total
         FROM invoices
         WHERE date >= $1 AND date < $2
         ORDER BY date, id",
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
}
