//! Payment API 模块

mod handler;

use axum::{Router, middleware, routing::get, routing::put};

use crate::auth::permissions::{PAYMENTS_READ, PAYMENTS_REFUND};
use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/payments", routes())
}

fn routes() -> Router<ServerState> {
    // 读取路由: payments:read (收银和超级管理员)
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_permission(PAYMENTS_READ)));

    // 退款: payments:refund (仅收银)
    let refund_routes = Router::new()
        .route("/{id}/refund", put(handler::refund))
        .layer(middleware::from_fn(require_permission(PAYMENTS_REFUND)));

    read_routes.merge(refund_routes)
}
