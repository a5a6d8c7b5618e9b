//! Payment Repository
//!
//! One payment row per order, enforced by the UNIQUE(order_id) index. The
//! insert and the CONFIRMED → PAID order write share one transaction, so a
//! payment can never exist for an order that was not advanced, and vice
//! versa.

use super::{RepoError, RepoResult, money_text, parse_enum, parse_money};
use rust_decimal::Decimal;
use shared::models::{Payment, PaymentMethod};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const PAYMENT_SELECT: &str = "SELECT id, order_id, amount, method, transaction_id, status, created_at, updated_at FROM payments";

/// Payment row as stored: amount, method and status are TEXT
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PaymentRow {
    pub id: i64,
    pub order_id: i64,
    pub amount: String,
    pub method: String,
    pub transaction_id: Option<String>,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl PaymentRow {
    pub fn into_payment(self) -> RepoResult<Payment> {
        let amount = parse_money(&self.amount, "payments.amount")?;
        let method = parse_enum(&self.method, "payments.method")?;
        let status = parse_enum(&self.status, "payments.status")?;
        Ok(Payment {
            id: self.id,
            order_id: self.order_id,
            amount,
            method,
            transaction_id: self.transaction_id,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Payment>> {
    let sql = format!("{PAYMENT_SELECT} ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, PaymentRow>(&sql).fetch_all(pool).await?;
    rows.into_iter().map(PaymentRow::into_payment).collect()
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Payment>> {
    let sql = format!("{PAYMENT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, PaymentRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(PaymentRow::into_payment).transpose()
}

pub async fn find_by_order(pool: &SqlitePool, order_id: i64) -> RepoResult<Option<Payment>> {
    let sql = format!("{PAYMENT_SELECT} WHERE order_id = ?");
    let row = sqlx::query_as::<_, PaymentRow>(&sql)
        .bind(order_id)
        .fetch_optional(pool)
        .await?;
    row.map(PaymentRow::into_payment).transpose()
}

/// Insert the payment and advance the order CONFIRMED → PAID atomically.
///
/// - `Err(Duplicate)`: a payment row already exists for this order
/// - `Ok(None)`: the order was not in CONFIRMED; nothing was written
/// - `Ok(Some(payment))`: both writes committed
pub async fn create_for_order(
    pool: &SqlitePool,
    order_id: i64,
    amount: Decimal,
    method: PaymentMethod,
    transaction_id: Option<&str>,
) -> RepoResult<Option<Payment>> {
    let now = now_millis();
    let id = snowflake_id();

    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO payments (id, order_id, amount, method, transaction_id, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, 'COMPLETED', ?6, ?6)",
    )
    .bind(id)
    .bind(order_id)
    .bind(money_text(amount))
    .bind(method.as_str())
    .bind(transaction_id)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    let rows = sqlx::query(
        "UPDATE orders SET status = 'PAID', updated_at = ?1 WHERE id = ?2 AND status = 'CONFIRMED'",
    )
    .bind(now)
    .bind(order_id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Ok(None);
    }
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create payment".into()))
        .map(Some)
}

/// Flip a completed payment to REFUNDED and force its order to CANCELLED,
/// in one transaction. Returns false when the payment is not COMPLETED.
pub async fn refund(pool: &SqlitePool, payment_id: i64) -> RepoResult<bool> {
    let now = now_millis();
    let mut tx = pool.begin().await?;
    let rows = sqlx::query(
        "UPDATE payments SET status = 'REFUNDED', updated_at = ?1 WHERE id = ?2 AND status = 'COMPLETED'",
    )
    .bind(now)
    .bind(payment_id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Ok(false);
    }

    let order_id: i64 = sqlx::query_scalar("SELECT order_id FROM payments WHERE id = ?")
        .bind(payment_id)
        .fetch_one(&mut *tx)
        .await?;
    sqlx::query("UPDATE orders SET status = 'CANCELLED', updated_at = ?1 WHERE id = ?2")
        .bind(now)
        .bind(order_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(true)
}
