//! Data models
//!
//! Shared between the server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY). Money fields are
//! `rust_decimal::Decimal` and serialize as canonical decimal strings.

pub mod category;
pub mod customer;
pub mod menu_item;
pub mod order;
pub mod payment;
pub mod user;

// Re-exports
pub use category::*;
pub use customer::*;
pub use menu_item::*;
pub use order::*;
pub use payment::*;
pub use user::*;
