use std::path::{Path, PathBuf};

use crate::auth::JwtConfig;

/// 服务器配置 - 门店节点的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | SERVER_HOST | 0.0.0.0 | 监听地址 |
/// | SERVER_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_PATH | data/cafe.db | SQLite 数据库文件 |
/// | JWT_SECRET | (开发环境自动生成) | JWT 密钥，至少 32 字节 |
/// | TOKEN_EXPIRY_HOURS | 12 | 令牌有效期 (小时) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (不写文件) | 滚动日志目录 |
/// | ADMIN_USERNAME | admin | 初始超级管理员账号 |
/// | ADMIN_PASSWORD | admin123 | 初始超级管理员密码 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// DATABASE_PATH=/data/cafe.db SERVER_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 监听地址
    pub host: String,
    /// HTTP API 服务端口
    pub port: u16,
    /// SQLite 数据库文件路径
    pub database_path: String,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 日志级别 (tracing env-filter 语法)
    pub log_level: String,
    /// 滚动日志目录；`None` 时只输出到终端
    pub log_dir: Option<String>,
    /// 初始超级管理员账号 (仅空库时写入)
    pub admin_username: String,
    /// 初始超级管理员密码 (仅空库时写入)
    pub admin_password: String,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/cafe.db".into()),
            jwt: JwtConfig::default(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            admin_username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            admin_password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(database_path: impl Into<String>, port: u16) -> Self {
        let mut config = Self::from_env();
        config.database_path = database_path.into();
        config.port = port;
        config
    }

    /// 确保数据库文件所在目录存在
    ///
    /// SQLite 的 `create_if_missing` 只建文件不建目录
    pub fn ensure_database_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = Path::new(&self.database_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    /// 滚动日志目录
    pub fn log_dir_path(&self) -> Option<PathBuf> {
        self.log_dir.as_ref().map(PathBuf::from)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_overrides_replaces_db_and_port() {
        let config = Config::with_overrides("/tmp/test-cafe.db", 18080);
        assert_eq!(config.database_path, "/tmp/test-cafe.db");
        assert_eq!(config.port, 18080);
    }

    #[test]
    fn test_environment_predicates() {
        let mut config = Config::with_overrides(":memory:", 0);
        config.environment = "production".into();
        assert!(config.is_production());
        assert!(!config.is_development());

        config.environment = "development".into();
        assert!(config.is_development());
    }

    #[test]
    fn test_ensure_database_dir_handles_bare_filename() {
        // 纯文件名没有父目录，不应报错
        let mut config = Config::with_overrides("cafe.db", 0);
        assert!(config.ensure_database_dir().is_ok());

        config.database_path = "".into();
        assert!(config.ensure_database_dir().is_ok());
    }
}
