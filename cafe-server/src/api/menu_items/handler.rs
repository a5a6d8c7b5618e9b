//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use shared::{AppError, AppResult, ErrorCode};

use crate::core::ServerState;
use crate::db::repository::{category, menu_item};
use crate::orders::money;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};

#[derive(Debug, Deserialize)]
pub struct MenuItemListQuery {
    pub category_id: Option<i64>,
}

/// GET /api/menu-items - 获取菜单 (可按分类过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MenuItemListQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let items = match query.category_id {
        Some(category_id) => menu_item::find_by_category(state.pool(), category_id).await?,
        None => menu_item::find_all(state.pool()).await?,
    };
    Ok(Json(items))
}

/// GET /api/menu-items/:id - 获取单个菜单项
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuItem>> {
    let item = menu_item::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| item_not_found(id))?;
    Ok(Json(item))
}

/// POST /api/menu-items - 创建菜单项
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    money::validate_price(payload.price)?;
    if category::find_by_id(state.pool(), payload.category_id)
        .await?
        .is_none()
    {
        return Err(AppError::with_message(
            ErrorCode::CategoryNotFound,
            format!("Category {} not found", payload.category_id),
        ));
    }

    let item = menu_item::create(state.pool(), payload).await?;
    tracing::info!(menu_item_id = item.id, name = %item.name, price = %item.price, "Menu item created");
    Ok(Json(item))
}

/// PUT /api/menu-items/:id - 更新菜单项 (部分字段)
///
/// Price edits only affect future orders; sold lines keep their snapshot.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(price) = payload.price {
        money::validate_price(price)?;
    }
    if let Some(category_id) = payload.category_id
        && category::find_by_id(state.pool(), category_id)
            .await?
            .is_none()
    {
        return Err(AppError::with_message(
            ErrorCode::CategoryNotFound,
            format!("Category {category_id} not found"),
        ));
    }

    if menu_item::find_by_id(state.pool(), id).await?.is_none() {
        return Err(item_not_found(id));
    }
    let item = menu_item::update(state.pool(), id, payload).await?;
    Ok(Json(item))
}

/// DELETE /api/menu-items/:id - 删除菜单项
///
/// Items referenced by order lines cannot be removed; take them off sale
/// with `is_available` instead.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    if menu_item::find_by_id(state.pool(), id).await?.is_none() {
        return Err(item_not_found(id));
    }
    let references = menu_item::count_order_items(state.pool(), id).await?;
    if references > 0 {
        return Err(AppError::with_message(
            ErrorCode::MenuItemInUse,
            format!("Menu item {id} appears in {references} order lines"),
        ));
    }

    let deleted = menu_item::delete(state.pool(), id).await?;
    tracing::info!(menu_item_id = id, "Menu item deleted");
    Ok(Json(deleted))
}

fn item_not_found(id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::MenuItemNotFound,
        format!("Menu item {id} not found"),
    )
}
