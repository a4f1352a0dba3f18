use shared::models::PaymentMethod;
use sqlx::PgPool;

pub async fn list_all(pool: &PgPool) -> Result<Vec<PaymentMethod>, sqlx::Error> {
    sqlx::query_as("SELECT code, name FROM payment_methods ORDER BY code")
        .fetch_all(pool)
        .await
}
