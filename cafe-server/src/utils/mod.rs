//! 工具模块 - 通用工具函数
//!
//! - [`logger`] - tracing 初始化 (stdout / rolling file / JSON)
//! - [`validation`] - 文本长度校验
//!
//! Error types live in `shared::error` and are re-exported from the crate
//! root; this module only carries server-local helpers.

pub mod logger;
pub mod validation;

pub use logger::{init_logger, init_logger_with_file};
