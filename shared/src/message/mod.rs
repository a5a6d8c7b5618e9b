//! Event payloads published by the server
//!
//! The server core emits typed events through an injected bus; the delivery
//! transport (polling, push, in-process subscriber) is a collaborator
//! concern and lives outside this crate.

mod payload;

pub use payload::{OrderEvent, OrderEventAction};

// Convenience re-exports: the denormalized views events carry
pub use crate::models::{OrderDetail, OrderItemDetail};
