//! Order Repository
//!
//! Orders and their line items are written together in one transaction, and
//! every status change is a conditional update on the expected prior status.
//! `rows_affected == 0` is how a lost race surfaces; callers translate that
//! into a conflict for the client.

use super::{RepoError, RepoResult, money_text, parse_enum, parse_money};
use rust_decimal::Decimal;
use shared::models::{MenuItem, Order, OrderDetail, OrderItem, OrderItemDetail, OrderStatus};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const ORDER_SELECT: &str = "SELECT id, order_number, status, total_amount, notes, customer_id, created_by, confirmed_by, prepared_by, created_at, updated_at FROM orders";

/// Order row as stored: status and total_amount are TEXT
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderRow {
    pub id: i64,
    pub order_number: String,
    pub status: String,
    pub total_amount: String,
    pub notes: Option<String>,
    pub customer_id: i64,
    pub created_by: i64,
    pub confirmed_by: Option<i64>,
    pub prepared_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl OrderRow {
    pub fn into_order(self) -> RepoResult<Order> {
        let status = parse_enum(&self.status, "orders.status")?;
        let total_amount = parse_money(&self.total_amount, "orders.total_amount")?;
        Ok(Order {
            id: self.id,
            order_number: self.order_number,
            status,
            total_amount,
            notes: self.notes,
            customer_id: self.customer_id,
            created_by: self.created_by,
            confirmed_by: self.confirmed_by,
            prepared_by: self.prepared_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Line item joined with its menu item (columns aliased with `mi_`)
#[derive(Debug, Clone, sqlx::FromRow)]
struct ItemWithMenuRow {
    id: i64,
    order_id: i64,
    menu_item_id: i64,
    quantity: i64,
    unit_price: String,
    total_price: String,
    mi_category_id: i64,
    mi_name: String,
    mi_price: String,
    mi_is_available: bool,
    mi_created_at: i64,
    mi_updated_at: i64,
}

impl ItemWithMenuRow {
    fn into_detail(self) -> RepoResult<OrderItemDetail> {
        let unit_price = parse_money(&self.unit_price, "order_items.unit_price")?;
        let total_price = parse_money(&self.total_price, "order_items.total_price")?;
        let menu_price = parse_money(&self.mi_price, "menu_items.price")?;
        Ok(OrderItemDetail {
            item: OrderItem {
                id: self.id,
                order_id: self.order_id,
                menu_item_id: self.menu_item_id,
                quantity: self.quantity,
                unit_price,
                total_price,
            },
            menu_item: MenuItem {
                id: self.menu_item_id,
                category_id: self.mi_category_id,
                name: self.mi_name,
                price: menu_price,
                is_available: self.mi_is_available,
                created_at: self.mi_created_at,
                updated_at: self.mi_updated_at,
            },
        })
    }
}

// ====== Insert payload ======

/// Validated order snapshot, ready to persist
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_number: String,
    pub total_amount: Decimal,
    pub notes: Option<String>,
    pub customer_id: i64,
    pub created_by: i64,
    pub items: Vec<NewOrderItem>,
}

/// One validated line with its price snapshot
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub menu_item_id: i64,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

// ====== Queries ======

pub async fn find_all(pool: &SqlitePool, status: Option<OrderStatus>) -> RepoResult<Vec<Order>> {
    let rows = match status {
        Some(s) => {
            let sql = format!("{ORDER_SELECT} WHERE status = ? ORDER BY created_at DESC");
            sqlx::query_as::<_, OrderRow>(&sql)
                .bind(s.as_str())
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!("{ORDER_SELECT} ORDER BY created_at DESC");
            sqlx::query_as::<_, OrderRow>(&sql).fetch_all(pool).await?
        }
    };
    rows.into_iter().map(OrderRow::into_order).collect()
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, OrderRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(OrderRow::into_order).transpose()
}

/// Line items with their menu items resolved, in insertion order
pub async fn find_item_details(
    pool: &SqlitePool,
    order_id: i64,
) -> RepoResult<Vec<OrderItemDetail>> {
    let rows = sqlx::query_as::<_, ItemWithMenuRow>(
        r#"
        SELECT oi.id, oi.order_id, oi.menu_item_id, oi.quantity, oi.unit_price, oi.total_price,
               mi.category_id AS mi_category_id, mi.name AS mi_name, mi.price AS mi_price,
               mi.is_available AS mi_is_available, mi.created_at AS mi_created_at,
               mi.updated_at AS mi_updated_at
        FROM order_items oi
        JOIN menu_items mi ON oi.menu_item_id = mi.id
        WHERE oi.order_id = ?
        ORDER BY oi.id
        "#,
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(ItemWithMenuRow::into_detail).collect()
}

/// Fully denormalized order: header, customer, items with menu items, payment
pub async fn load_detail(pool: &SqlitePool, order_id: i64) -> RepoResult<Option<OrderDetail>> {
    let Some(order) = find_by_id(pool, order_id).await? else {
        return Ok(None);
    };
    let customer = super::customer::find_by_id(pool, order.customer_id)
        .await?
        .ok_or_else(|| {
            RepoError::Database(format!(
                "Order {order_id} references missing customer {}",
                order.customer_id
            ))
        })?;
    let items = find_item_details(pool, order_id).await?;
    let payment = super::payment::find_by_order(pool, order_id).await?;
    Ok(Some(OrderDetail {
        order,
        customer,
        items,
        payment,
    }))
}

// ====== Writes ======

/// Persist the order and all its line items in one transaction. A unique
/// collision on order_number rolls everything back and surfaces as Duplicate.
pub async fn create_with_items(pool: &SqlitePool, data: &NewOrder) -> RepoResult<Order> {
    let now = now_millis();
    let order_id = snowflake_id();

    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO orders (id, order_number, status, total_amount, notes, customer_id, created_by, created_at, updated_at) VALUES (?1, ?2, 'PENDING', ?3, ?4, ?5, ?6, ?7, ?7)",
    )
    .bind(order_id)
    .bind(&data.order_number)
    .bind(money_text(data.total_amount))
    .bind(&data.notes)
    .bind(data.customer_id)
    .bind(data.created_by)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for item in &data.items {
        sqlx::query(
            "INSERT INTO order_items (id, order_id, menu_item_id, quantity, unit_price, total_price) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(snowflake_id())
        .bind(order_id)
        .bind(item.menu_item_id)
        .bind(item.quantity)
        .bind(money_text(item.unit_price))
        .bind(money_text(item.total_price))
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create order".into()))
}

/// Conditional status write: succeeds only while the order is still in
/// `expected`. Returns false when a concurrent writer got there first.
/// `confirmed_by` / `prepared_by` are recorded when provided, once.
pub async fn update_status_if(
    pool: &SqlitePool,
    order_id: i64,
    expected: OrderStatus,
    target: OrderStatus,
    confirmed_by: Option<i64>,
    prepared_by: Option<i64>,
) -> RepoResult<bool> {
    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE orders SET status = ?1, confirmed_by = COALESCE(?2, confirmed_by), prepared_by = COALESCE(?3, prepared_by), updated_at = ?4 WHERE id = ?5 AND status = ?6",
    )
    .bind(target.as_str())
    .bind(confirmed_by)
    .bind(prepared_by)
    .bind(now)
    .bind(order_id)
    .bind(expected.as_str())
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Cancel in one transaction: flip the order conditional on its current
/// status, and refund its completed payment if one exists. Returns false
/// when the order already left `expected`.
pub async fn cancel_with_refund(
    pool: &SqlitePool,
    order_id: i64,
    expected: OrderStatus,
) -> RepoResult<bool> {
    let now = now_millis();
    let mut tx = pool.begin().await?;
    let rows = sqlx::query(
        "UPDATE orders SET status = 'CANCELLED', updated_at = ?1 WHERE id = ?2 AND status = ?3",
    )
    .bind(now)
    .bind(order_id)
    .bind(expected.as_str())
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Ok(false);
    }
    sqlx::query(
        "UPDATE payments SET status = 'REFUNDED', updated_at = ?1 WHERE order_id = ?2 AND status = 'COMPLETED'",
    )
    .bind(now)
    .bind(order_id)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(true)
}
