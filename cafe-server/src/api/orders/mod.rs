//! Order API 模块
//!
//! 权限分层: reading, creating, transitioning and paying are four separate
//! grants, wired per route. What a role may do to a specific order in a
//! specific status is decided later by the workflow table inside the
//! service, independently of these grants.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::permissions::{ORDERS_CREATE, ORDERS_READ, ORDERS_TRANSITION, PAYMENTS_PROCESS};
use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_permission(ORDERS_READ)));

    let create_routes = Router::new()
        .route("/", post(handler::create))
        .layer(middleware::from_fn(require_permission(ORDERS_CREATE)));

    let transition_routes = Router::new()
        .route("/{id}/status", put(handler::update_status))
        .layer(middleware::from_fn(require_permission(ORDERS_TRANSITION)));

    let payment_routes = Router::new()
        .route("/{id}/payments", post(handler::process_payment))
        .layer(middleware::from_fn(require_permission(PAYMENTS_PROCESS)));

    read_routes
        .merge(create_routes)
        .merge(transition_routes)
        .merge(payment_routes)
}
