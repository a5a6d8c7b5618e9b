//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::models::{Category, CategoryCreate, CategoryUpdate};
use shared::{AppError, AppResult, ErrorCode};

use crate::core::ServerState;
use crate::db::repository::{RepoError, category};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};

/// GET /api/categories - 获取所有分类 (按 sort_order 排序)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let categories = category::find_all(state.pool()).await?;
    Ok(Json(categories))
}

/// POST /api/categories - 创建分类
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Category>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let name = payload.name.clone();
    let category = match category::create(state.pool(), payload).await {
        Ok(category) => category,
        Err(RepoError::Duplicate(_)) => return Err(name_exists(&name)),
        Err(e) => return Err(e.into()),
    };

    tracing::info!(category_id = category.id, name = %category.name, "Category created");
    Ok(Json(category))
}

/// PUT /api/categories/:id - 更新分类
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }

    let name = payload.name.clone();
    let category = match category::update(state.pool(), id, payload).await {
        Ok(category) => category,
        Err(RepoError::NotFound(_)) => return Err(category_not_found(id)),
        Err(RepoError::Duplicate(_)) => {
            return Err(name_exists(name.as_deref().unwrap_or_default()));
        }
        Err(e) => return Err(e.into()),
    };
    Ok(Json(category))
}

/// DELETE /api/categories/:id - 删除分类
///
/// A category still holding menu items cannot be removed.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    if category::find_by_id(state.pool(), id).await?.is_none() {
        return Err(category_not_found(id));
    }
    let items = category::count_menu_items(state.pool(), id).await?;
    if items > 0 {
        return Err(AppError::with_message(
            ErrorCode::CategoryHasItems,
            format!("Category {id} still has {items} menu items"),
        ));
    }

    let deleted = category::delete(state.pool(), id).await?;
    tracing::info!(category_id = id, "Category deleted");
    Ok(Json(deleted))
}

fn category_not_found(id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::CategoryNotFound,
        format!("Category {id} not found"),
    )
}

fn name_exists(name: &str) -> AppError {
    AppError::with_message(
        ErrorCode::CategoryNameExists,
        format!("Category '{name}' already exists"),
    )
}
