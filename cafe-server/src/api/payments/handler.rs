//! Payment API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::models::Payment;
use shared::{AppError, AppResult, ErrorCode, OrderDetail};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::payment;
use crate::orders::service;

/// GET /api/payments - 列出支付记录 (最近的在前)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Payment>>> {
    let payments = payment::find_all(state.pool()).await?;
    Ok(Json(payments))
}

/// GET /api/payments/:id - 获取单笔支付
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Payment>> {
    let payment = payment::find_by_id(state.pool(), id).await?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::PaymentNotFound,
            format!("Payment {id} not found"),
        )
    })?;
    Ok(Json(payment))
}

/// PUT /api/payments/:id/refund - 退款
///
/// Returns the affected order in full; its status is CANCELLED afterwards.
pub async fn refund(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let detail = service::refund_payment(&state, &user, id).await?;
    Ok(Json(detail))
}
