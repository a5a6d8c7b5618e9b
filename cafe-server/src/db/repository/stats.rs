//! Aggregate queries for the statistics endpoint
//!
//! Money columns are TEXT, and SQLite's SUM() would coerce them through
//! float affinity. Amounts therefore come back row by row and are summed
//! as exact decimals here.

use rust_decimal::Decimal;
use shared::models::OrderStatus;
use sqlx::SqlitePool;

use super::{RepoResult, parse_enum, parse_money};

/// Order counts grouped by status. Statuses with zero orders are absent.
pub async fn count_orders_by_status(pool: &SqlitePool) -> RepoResult<Vec<(OrderStatus, i64)>> {
    let rows: Vec<(String, i64)> =
        sqlx::query_as("SELECT status, COUNT(*) FROM orders GROUP BY status")
            .fetch_all(pool)
            .await?;
    rows.into_iter()
        .map(|(raw, count)| Ok((parse_enum(&raw, "orders.status")?, count)))
        .collect()
}

/// Orders created at or after `since` (Unix millis)
pub async fn count_orders_since(pool: &SqlitePool, since: i64) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE created_at >= ?")
        .bind(since)
        .fetch_one(pool)
        .await?;
    Ok(n)
}

/// Revenue: the exact sum of COMPLETED payment amounts, optionally limited
/// to payments taken at or after `since`. Refunded payments never count.
pub async fn completed_revenue(pool: &SqlitePool, since: Option<i64>) -> RepoResult<Decimal> {
    let amounts: Vec<String> = match since {
        Some(ts) => {
            sqlx::query_scalar(
                "SELECT amount FROM payments WHERE status = 'COMPLETED' AND created_at >= ?",
            )
            .bind(ts)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_scalar("SELECT amount FROM payments WHERE status = 'COMPLETED'")
                .fetch_all(pool)
                .await?
        }
    };

    let mut total = Decimal::ZERO;
    for raw in &amounts {
        total += parse_money(raw, "payments.amount")?;
    }
    Ok(total)
}
