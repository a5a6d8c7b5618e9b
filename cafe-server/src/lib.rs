//! Cafe Server - 咖啡店收银与订单服务
//!
//! # 架构概述
//!
//! 单进程 HTTP 服务，职责划分如下：
//!
//! - **认证** (`auth`): JWT + Argon2, 按角色的权限授权表
//! - **订单** (`orders`): 金额运算、状态流转表、订单工作流
//! - **数据库** (`db`): SQLite (sqlx), 仓储层负责全部 SQL
//! - **事件** (`message`): 进程内订单事件总线
//! - **HTTP API** (`api`): RESTful 路由和处理器
//!
//! # 模块结构
//!
//! ```text
//! cafe-server/src/
//! ├── core/          # 配置、状态、启动
//! ├── auth/          # JWT 认证、权限表
//! ├── api/           # HTTP 路由和处理器
//! ├── orders/        # 订单工作流
//! ├── db/            # 数据库层
//! ├── message/       # 事件总线
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod message;
pub mod orders;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use message::EventBus;

// Re-export unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境: dotenv + 日志，返回加载好的配置
///
/// `.env` is optional (development convenience); real deployments set the
/// environment directly.
pub fn setup_environment() -> Config {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    utils::logger::init_logger_with_file(
        Some(&config.log_level),
        config.is_production(),
        config.log_dir.as_deref(),
    );
    config
}

pub fn print_banner() {
    println!(
        r#"
   ______      ____
  / ____/___ _/ __/__
 / /   / __ `/ /_/ _ \
/ /___/ /_/ / __/  __/
\____/\__,_/_/  \___/
      POS ☕
    "#
    );
}
