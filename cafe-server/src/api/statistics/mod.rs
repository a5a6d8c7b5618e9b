//! Statistics API 模块 (运营数据)

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::permissions::STATISTICS_READ;
use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/statistics", routes())
}

fn routes() -> Router<ServerState> {
    // 报表查看: statistics:read (仅超级管理员)
    Router::new()
        .route("/overview", get(handler::overview))
        .layer(middleware::from_fn(require_permission(STATISTICS_READ)))
}
