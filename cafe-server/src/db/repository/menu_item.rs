//! Menu Item Repository

use super::{RepoError, RepoResult, money_text, parse_money};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const MENU_ITEM_SELECT: &str =
    "SELECT id, category_id, name, price, is_available, created_at, updated_at FROM menu_items";

/// Menu item row as stored: price is a TEXT decimal
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MenuItemRow {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub price: String,
    pub is_available: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl MenuItemRow {
    pub fn into_menu_item(self) -> RepoResult<MenuItem> {
        let price = parse_money(&self.price, "menu_items.price")?;
        Ok(MenuItem {
            id: self.id,
            category_id: self.category_id,
            name: self.name,
            price,
            is_available: self.is_available,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<MenuItem>> {
    let sql = format!("{MENU_ITEM_SELECT} ORDER BY name");
    let rows = sqlx::query_as::<_, MenuItemRow>(&sql)
        .fetch_all(pool)
        .await?;
    rows.into_iter().map(MenuItemRow::into_menu_item).collect()
}

pub async fn find_by_category(pool: &SqlitePool, category_id: i64) -> RepoResult<Vec<MenuItem>> {
    let sql = format!("{MENU_ITEM_SELECT} WHERE category_id = ? ORDER BY name");
    let rows = sqlx::query_as::<_, MenuItemRow>(&sql)
        .bind(category_id)
        .fetch_all(pool)
        .await?;
    rows.into_iter().map(MenuItemRow::into_menu_item).collect()
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let sql = format!("{MENU_ITEM_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, MenuItemRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(MenuItemRow::into_menu_item).transpose()
}

pub async fn create(pool: &SqlitePool, data: MenuItemCreate) -> RepoResult<MenuItem> {
    let now = now_millis();
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO menu_items (id, category_id, name, price, is_available, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(id)
    .bind(data.category_id)
    .bind(&data.name)
    .bind(money_text(data.price))
    .bind(data.is_available.unwrap_or(true))
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: MenuItemUpdate) -> RepoResult<MenuItem> {
    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE menu_items SET category_id = COALESCE(?1, category_id), name = COALESCE(?2, name), price = COALESCE(?3, price), is_available = COALESCE(?4, is_available), updated_at = ?5 WHERE id = ?6",
    )
    .bind(data.category_id)
    .bind(&data.name)
    .bind(data.price.map(money_text))
    .bind(data.is_available)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
}

/// Order lines snapshotting this item. Deletion is refused while any exist;
/// mark the item unavailable instead.
pub async fn count_order_items(pool: &SqlitePool, menu_item_id: i64) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM order_items WHERE menu_item_id = ?")
        .bind(menu_item_id)
        .fetch_one(pool)
        .await?;
    Ok(n)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM menu_items WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
