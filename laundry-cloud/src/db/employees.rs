use shared::models::Employee;
use sqlx::PgPool;

pub async fn list_all(pool: &PgPool) -> Result<Vec<Employee>, sqlx::Error> {
    sqlx::query_as("SELECT id, name FROM employees ORDER BY name, id")
        .fetch_all(pool)
        .await
}
