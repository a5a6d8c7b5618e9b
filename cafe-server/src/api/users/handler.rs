//! User API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::models::{User, UserCreate, UserUpdate};
use shared::{AppError, AppResult, ErrorCode};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, user};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};

/// GET /api/users - 列出所有员工账号
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<User>>> {
    let users = user::find_all(state.pool()).await?;
    Ok(Json(users))
}

/// GET /api/users/:id - 获取单个账号
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<User>> {
    let user = user::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    Ok(Json(user))
}

/// POST /api/users - 创建账号
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<User>> {
    validate_required_text(&payload.username, "username", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.password, "password", MAX_PASSWORD_LEN)?;
    validate_required_text(&payload.display_name, "display_name", MAX_NAME_LEN)?;

    let username = payload.username.clone();
    let user = match user::create(state.pool(), payload).await {
        Ok(user) => user,
        Err(RepoError::Duplicate(_)) => {
            return Err(AppError::with_message(
                ErrorCode::UsernameExists,
                format!("Username '{username}' is already taken"),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = user.id, username = %user.username, role = %user.role, "User created");
    Ok(Json(user))
}

/// PUT /api/users/:id - 更新账号 (部分字段)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<User>> {
    if let Some(display_name) = &payload.display_name {
        validate_required_text(display_name, "display_name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.password, "password", MAX_PASSWORD_LEN)?;

    let user = match user::update(state.pool(), id, payload).await {
        Ok(user) => user,
        Err(RepoError::NotFound(_)) => return Err(user_not_found(id)),
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = user.id, "User updated");
    Ok(Json(user))
}

/// DELETE /api/users/:id - 停用账号 (软删除)
pub async fn delete(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    if id == current.id {
        return Err(AppError::with_message(
            ErrorCode::CannotDeleteSelf,
            "You cannot deactivate your own account",
        ));
    }

    let deleted = user::delete(state.pool(), id).await?;
    if !deleted {
        return Err(user_not_found(id));
    }

    tracing::info!(user_id = id, by = current.id, "User deactivated");
    Ok(Json(true))
}

fn user_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::UserNotFound, format!("User {id} not found"))
}
