//! HTTP API 层
//!
//! One module per resource (`<resource>/{mod.rs, handler.rs}`), each nesting
//! its routes under `/api/<resource>` and declaring its own permission
//! layers. [`build_app`] merges them and applies the cross-cutting stack:
//!
//! ```text
//! request ──► log_request ──► compression ──► CORS ──► require_auth ──► route
//! ```
//!
//! 鉴权顺序: `require_auth` runs before any route-level `require_permission`
//! layer, so permission checks can rely on `CurrentUser` being present.

pub mod auth;
pub mod categories;
pub mod customers;
pub mod menu_items;
pub mod orders;
pub mod payments;
pub mod statistics;
pub mod users;

use axum::{Router, middleware};
use tower_http::{compression::CompressionLayer, cors::CorsLayer};

use crate::auth::require_auth;
use crate::core::ServerState;

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = std::time::Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let latency_ms = started.elapsed().as_millis();

    tracing::info!(target: "http_access", latency_ms, "{} {} {}", method, uri, status);

    response
}

/// All resource routers merged (without state)
fn api_router() -> Router<ServerState> {
    Router::<ServerState>::new()
        // Core APIs
        .merge(auth::router())
        .merge(users::router())
        // Data model APIs
        .merge(customers::router())
        .merge(categories::router())
        .merge(menu_items::router())
        // Workflow APIs
        .merge(orders::router())
        .merge(payments::router())
        .merge(statistics::router())
}

/// Build the complete application: resource routers, JWT auth, HTTP middleware
pub fn build_app(state: ServerState) -> Router {
    api_router()
        // JWT 认证中间件 - require_auth 内部会跳过公共路由
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        // Tower HTTP 中间件
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        // HTTP 请求日志中间件
        .layer(middleware::from_fn(log_request))
}
