//! Shared types for the cafe POS
//!
//! Common types used by the server and API clients: the unified error
//! system, data models, event payloads, and small utilities.

pub mod error;
pub mod message;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use message::{OrderDetail, OrderEvent, OrderEventAction, OrderItemDetail};
pub use serde::{Deserialize, Serialize};
