//! Auth API 模块
//!
//! `/login` is the only public route in the whole API; `require_auth`
//! skips it by path. `/me` just needs a valid token, no permission.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/login", post(handler::login))
        .route("/me", get(handler::me))
}
