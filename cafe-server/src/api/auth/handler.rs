//! Authentication Handlers
//!
//! 登录与当前用户信息

use std::time::Duration;

use axum::{Json, extract::State};

use shared::models::{LoginRequest, LoginResponse, User};
use shared::{AppError, AppResult, ErrorCode};

use crate::auth::{CurrentUser, role_permissions};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::security_log;

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/login - 用户登录
///
/// Unknown username and wrong password fail the same way, after the same
/// fixed delay, so responses leak nothing about which usernames exist.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let row = user::find_row_by_username(state.pool(), &req.username).await?;

    // Fixed delay before checking the result (timing attack prevention)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let row = match row {
        Some(row) => row,
        None => {
            security_log!(
                "WARN",
                "login_failed",
                username = req.username.clone(),
                reason = "user_not_found"
            );
            return Err(AppError::invalid_credentials());
        }
    };

    if !row.is_active {
        security_log!(
            "WARN",
            "login_failed",
            username = req.username.clone(),
            reason = "account_disabled"
        );
        return Err(AppError::with_message(
            ErrorCode::AccountDisabled,
            "Account has been disabled",
        ));
    }

    let password_valid = row
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
    if !password_valid {
        security_log!(
            "WARN",
            "login_failed",
            username = req.username.clone(),
            reason = "invalid_credentials"
        );
        return Err(AppError::invalid_credentials());
    }

    let user: User = row.into_user()?;
    let permissions = role_permissions(user.role);
    let token = state
        .get_jwt_service()
        .generate_token(user.id, &user.username, user.role, permissions)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    security_log!(
        "INFO",
        "login_success",
        user_id = user.id,
        username = user.username.clone()
    );
    tracing::info!(user_id = user.id, username = %user.username, role = %user.role, "User logged in");

    Ok(Json(LoginResponse { token, user }))
}

/// GET /api/auth/me - 当前登录用户
///
/// Reads fresh from the DB, so deactivation takes effect before the
/// token expires.
pub async fn me(State(state): State<ServerState>, user: CurrentUser) -> AppResult<Json<User>> {
    let fresh = user::find_by_id(state.pool(), user.id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::UserNotFound, format!("User {} not found", user.id))
        })?;
    Ok(Json(fresh))
}
