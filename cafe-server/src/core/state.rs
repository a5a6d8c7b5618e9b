use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::{DbService, repository::user};
use crate::message::EventBus;
use shared::message::OrderDetail;
use shared::models::{StaffRole, UserCreate};

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是整个服务的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | SQLite 连接池 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | event_bus | Arc<EventBus> | 订单事件总线 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 数据库服务
    pub db: DbService,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 订单事件总线
    pub event_bus: Arc<EventBus>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`initialize()`](Self::initialize) 方法代替
    pub fn new(
        config: Config,
        db: DbService,
        jwt_service: Arc<JwtService>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            config,
            db,
            jwt_service,
            event_bus,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 数据库目录和连接池 (含迁移)
    /// 2. JWT 服务和事件总线
    /// 3. 空库时写入初始超级管理员
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_database_dir()
            .expect("Failed to create database directory");

        let db = DbService::new(&config.database_path)
            .await
            .expect("Failed to initialize database");

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let event_bus = Arc::new(EventBus::new());

        let state = Self::new(config.clone(), db, jwt_service, event_bus);

        state
            .seed_admin_if_empty()
            .await
            .expect("Failed to seed the initial super admin account");

        state
    }

    /// 空库时写入初始超级管理员
    ///
    /// 只看用户总数：一旦有任何账号 (包括被停用的) 就不再插手。
    async fn seed_admin_if_empty(&self) -> Result<(), shared::AppError> {
        let pool = self.pool();
        if user::count(pool).await? > 0 {
            return Ok(());
        }

        let admin = user::create(
            pool,
            UserCreate {
                username: self.config.admin_username.clone(),
                password: self.config.admin_password.clone(),
                display_name: "Super Admin".to_string(),
                role: StaffRole::SuperAdmin,
            },
        )
        .await?;

        tracing::info!(
            user_id = admin.id,
            username = %admin.username,
            "Seeded initial super admin account"
        );
        if self.config.admin_password == "admin123" {
            tracing::warn!("⚠️  Super admin uses the default password, change it immediately");
        }

        Ok(())
    }

    /// 获取数据库连接池
    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 获取事件总线
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// 发布订单创建事件
    ///
    /// 版本号由总线自动递增管理。
    pub fn publish_order_created(&self, order: OrderDetail) {
        self.event_bus.publish_created(order);
    }

    /// 发布订单变更事件 (状态流转、收款、退款)
    pub fn publish_order_updated(&self, order: OrderDetail) {
        self.event_bus.publish_updated(order);
    }
}
