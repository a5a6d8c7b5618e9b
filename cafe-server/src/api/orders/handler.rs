//! Order API Handlers
//!
//! Thin wrappers: loading and mutation rules live in [`crate::orders::service`].

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::models::{Order, OrderCreate, OrderStatus, PaymentCreate, StatusUpdateRequest};
use shared::{AppError, AppResult, ErrorCode, OrderDetail};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::order;
use crate::orders::service;

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
}

/// GET /api/orders - 列出订单 (可按状态过滤，最近的在前)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = order::find_all(state.pool(), query.status).await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id - 订单详情 (含顾客、行项目、支付)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let detail = order::load_detail(state.pool(), id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
    })?;
    Ok(Json(detail))
}

/// POST /api/orders - 创建订单
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<OrderDetail>> {
    let detail = service::create_order(&state, &user, payload).await?;
    Ok(Json(detail))
}

/// PUT /api/orders/:id/status - 订单状态流转
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<StatusUpdateRequest>,
) -> AppResult<Json<OrderDetail>> {
    let detail = service::update_order_status(&state, &user, id, payload.status).await?;
    Ok(Json(detail))
}

/// POST /api/orders/:id/payments - 收款 (CONFIRMED → PAID)
pub async fn process_payment(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<PaymentCreate>,
) -> AppResult<Json<OrderDetail>> {
    let detail = service::process_payment(&state, &user, id, payload).await?;
    Ok(Json(detail))
}
