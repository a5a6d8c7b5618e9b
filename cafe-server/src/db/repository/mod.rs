//! Repository Module
//!
//! Data access as free functions over the SQLite pool, one file per entity.
//! Driver errors are translated to [`RepoError`] at this boundary; money
//! columns are stored as TEXT and parsed into exact decimals on the way out.

pub mod category;
pub mod customer;
pub mod menu_item;
pub mod order;
pub mod payment;
pub mod stats;
pub mod user;

use rust_decimal::Decimal;
use shared::{AppError, ErrorCode};
use std::str::FromStr;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound(err.to_string()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepoError::Duplicate(db_err.to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Parse a TEXT money column into an exact decimal
pub(crate) fn parse_money(raw: &str, column: &str) -> RepoResult<Decimal> {
    Decimal::from_str(raw)
        .map_err(|e| RepoError::Database(format!("invalid decimal in {column}: {e}")))
}

/// Canonical storage form for money: 2-decimal text, e.g. `2.50`
pub(crate) fn money_text(value: Decimal) -> String {
    format!("{value:.2}")
}

/// Parse a TEXT enum column via the model's FromStr
pub(crate) fn parse_enum<T>(raw: &str, column: &str) -> RepoResult<T>
where
    T: FromStr<Err = String>,
{
    T::from_str(raw).map_err(|e| RepoError::Database(format!("invalid {column}: {e}")))
}
