//! Daily summary and cash closure orchestration
//!
//! Fetches invoices and reference lists concurrently, aggregates them with
//! [`crate::closure`] and persists closures.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{CashClosure, DailySummary, Employee, Invoice, PaymentMethod};

use crate::closure::{self, ClosureError, ClosureInput};
use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;
use crate::time;
use crate::validation::validate_max_amount;

/// Everything the aggregation needs for one business date
pub struct DayData {
    pub invoices: Vec<Invoice>,
    pub payment_methods: Vec<PaymentMethod>,
    pub employees: Vec<Employee>,
}

/// Invoices of `date` in the business timezone
pub async fn invoices_for_date(state: &AppState, date: NaiveDate) -> ServiceResult<Vec<Invoice>> {
    let start = time::day_start_millis(date, state.timezone);
    let end = time::day_end_millis(date, state.timezone);
    let rows = db::invoices::list_for_range(&state.pool, start, end).await?;
    Ok(closure::invoices_from_rows(rows)?)
}

async fn load_day(state: &AppState, date: NaiveDate) -> ServiceResult<DayData> {
    let start = time::day_start_millis(date, state.timezone);
    let end = time::day_end_millis(date, state.timezone);

    let (rows, payment_methods, employees) = tokio::try_join!(
        db::invoices::list_for_range(&state.pool, start, end),
        db::payment_methods::list_all(&state.pool),
        db::employees::list_all(&state.pool),
    )?;

    Ok(DayData {
        invoices: closure::invoices_from_rows(rows)?,
        payment_methods,
        employees,
    })
}

/// Summary for `date` plus the system cash implied by `opening_cash`
pub async fn daily_summary(
    state: &AppState,
    date: NaiveDate,
    opening_cash: Decimal,
) -> ServiceResult<(DailySummary, Decimal)> {
    let day = load_day(state, date).await?;
    let summary =
        closure::compute_daily_summary(date, &day.invoices, &day.payment_methods, &day.employees);
    let system_cash = closure::system_cash(&summary, &day.payment_methods, opening_cash);
    Ok((summary, system_cash))
}

/// Aggregate the closing date and record the closure, at most once per date
pub async fn create_cash_closure(
    state: &AppState,
    input: ClosureInput,
) -> ServiceResult<CashClosure> {
    let day = load_day(state, input.closing_date).await?;
    let summary = closure::compute_daily_summary(
        input.closing_date,
        &day.invoices,
        &day.payment_methods,
        &day.employees,
    );
    let reconciliation = closure::reconcile(
        &summary,
        &day.payment_methods,
        input.opening_cash,
        input.counted_cash,
    );
    validate_max_amount(reconciliation.system_cash, "system_cash")?;

    let created = db::cash_closures::create(
        &state.pool,
        &summary,
        &reconciliation,
        input.notes.as_deref(),
        shared::util::now_millis(),
    )
    .await?;

    match created {
        Some(record) => {
            tracing::info!(
                closing_date = %record.closing_date,
                system_cash = %record.system_cash,
                variance = %record.variance,
                "Cash closure recorded"
            );
            Ok(record)
        }
        None => {
            tracing::warn!(
                closing_date = %input.closing_date,
                "Duplicate cash closure rejected"
            );
            Err(ClosureError::DuplicateClosure {
                date: input.closing_date,
            }
            .into())
        }
    }
}

/// Run with a reachable Postgres: `DATABASE_URL=... cargo test -- --ignored`
#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use shared::error::ErrorCode;
    use sqlx::PgPool;

    use super::*;
    use crate::error::ServiceError;

    const TZ: chrono_tz::Tz = chrono_tz::Europe::Madrid;

    fn input(counted: &str) -> ClosureInput {
        ClosureInput {
            closing_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            opening_cash: Decimal::from_str("100.00").unwrap(),
            counted_cash: Decimal::from_str(counted).unwrap(),
            notes: None,
        }
    }

    async fn seed_day(pool: &PgPool, date: NaiveDate) {
        sqlx::query(
            "INSERT INTO payment_methods (code, name) VALUES ('cash', 'Efectivo'), ('card', 'Tarjeta')",
        )
        .execute(pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO employees (id, name) VALUES ('e1', 'Ana')")
            .execute(pool)
            .await
            .unwrap();

        let noon = time::day_start_millis(date, TZ) + 12 * 3_600_000;
        for (method, total) in [("cash", "50.00"), ("card", "30.00")] {
            sqlx::query(
                "INSERT INTO invoices (date, status, paid, payment_method, employee_id, subtotal, tax, total)
                 VALUES ($1, 'delivered', TRUE, $2, 'e1', $3, 0, $3)",
            )
            .bind(noon)
            .bind(method)
            .bind(Decimal::from_str(total).unwrap())
            .execute(pool)
            .await
            .unwrap();
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_second_closure_for_date_rejected(pool: PgPool) {
        let state = AppState::with_pool(pool.clone(), TZ);
        let first = input("140.00");
        seed_day(&pool, first.closing_date).await;

        let record = create_cash_closure(&state, first.clone()).await.unwrap();
        assert_eq!(record.system_cash, Decimal::from_str("150.00").unwrap());
        assert_eq!(record.variance, Decimal::from_str("-10.00").unwrap());

        let err = create_cash_closure(&state, input("150.00")).await.unwrap_err();
        match err {
            ServiceError::App(app) => {
                assert_eq!(app.code, ErrorCode::CashClosureExists);
                assert_eq!(app.http_status(), http::StatusCode::CONFLICT);
            }
            ServiceError::Db(e) => panic!("expected duplicate closure, got {e}"),
        }

        // first closure is left untouched
        let stored = db::cash_closures::find_by_date(&pool, first.closing_date)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.id, record.id);
        assert_eq!(stored.counted_cash, Decimal::from_str("140.00").unwrap());
        // Efectivo, Tarjeta and the always-present Pendiente row
        assert_eq!(stored.payment_breakdowns.len(), 3);
        assert_eq!(stored.employee_breakdowns.len(), 1);
    }
}
