//! Customer API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::models::{Customer, CustomerCreate, CustomerUpdate};
use shared::{AppError, AppResult, ErrorCode};

use crate::core::ServerState;
use crate::db::repository::customer;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};

/// GET /api/customers - 列出所有顾客
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Customer>>> {
    let customers = customer::find_all(state.pool()).await?;
    Ok(Json(customers))
}

/// GET /api/customers/:id - 获取单个顾客
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Customer>> {
    let customer = customer::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| customer_not_found(id))?;
    Ok(Json(customer))
}

/// POST /api/customers - 创建顾客
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CustomerCreate>,
) -> AppResult<Json<Customer>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;

    let customer = customer::create(state.pool(), payload).await?;
    tracing::info!(customer_id = customer.id, "Customer created");
    Ok(Json(customer))
}

/// PUT /api/customers/:id - 更新顾客 (部分字段)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CustomerUpdate>,
) -> AppResult<Json<Customer>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;

    if customer::find_by_id(state.pool(), id).await?.is_none() {
        return Err(customer_not_found(id));
    }
    let customer = customer::update(state.pool(), id, payload).await?;
    Ok(Json(customer))
}

/// DELETE /api/customers/:id - 删除顾客
///
/// Customers referenced by any order cannot be removed; order history
/// keeps pointing at them.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    if customer::find_by_id(state.pool(), id).await?.is_none() {
        return Err(customer_not_found(id));
    }
    let orders = customer::count_orders(state.pool(), id).await?;
    if orders > 0 {
        return Err(AppError::with_message(
            ErrorCode::CustomerHasOrders,
            format!("Customer {id} has {orders} orders and cannot be deleted"),
        ));
    }

    let deleted = customer::delete(state.pool(), id).await?;
    tracing::info!(customer_id = id, "Customer deleted");
    Ok(Json(deleted))
}

fn customer_not_found(id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::CustomerNotFound,
        format!("Customer {id} not found"),
    )
}
