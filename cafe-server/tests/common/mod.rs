//! 集成测试共用的初始化助手
//!
//! 每个测试用例独立建一个临时 SQLite 数据库，互不干扰。

#![allow(dead_code)]

use cafe_server::auth::{CurrentUser, role_permissions};
use cafe_server::db::repository::{category, customer, menu_item, user};
use cafe_server::{Config, ServerState};
use rust_decimal::Decimal;
use shared::models::{
    CategoryCreate, Customer, CustomerCreate, MenuItem, MenuItemCreate, StaffRole, UserCreate,
};
use tempfile::TempDir;

/// 初始化使用临时数据库的服务器状态
///
/// 调用方必须持有返回的 `TempDir`，drop 即删除数据库文件。
pub async fn test_state() -> (TempDir, ServerState) {
    let dir = tempfile::tempdir().expect("create tempdir");
    let db_path = dir.path().join("cafe-test.db");
    let config = Config::with_overrides(db_path.display().to_string(), 0);
    let state = ServerState::initialize(&config).await;
    (dir, state)
}

pub fn dec(s: &str) -> Decimal {
    s.parse().expect("valid decimal literal")
}

/// 建一个真实员工账号并返回其认证上下文
///
/// 订单表的 created_by/confirmed_by/prepared_by 都是外键，
/// 所以测试里的操作者必须是数据库里真实存在的用户。
pub async fn seed_staff(state: &ServerState, username: &str, role: StaffRole) -> CurrentUser {
    let user = user::create(
        state.pool(),
        UserCreate {
            username: username.to_string(),
            password: "integration-test-pw".to_string(),
            display_name: username.to_string(),
            role,
        },
    )
    .await
    .expect("create staff user");

    CurrentUser {
        id: user.id,
        username: user.username,
        role,
        permissions: role_permissions(role)
            .iter()
            .map(|p| p.to_string())
            .collect(),
    }
}

/// 基础测试数据: 一位顾客和三个菜单项
pub struct Fixture {
    pub customer: Customer,
    /// 2.50, 在售
    pub espresso: MenuItem,
    /// 3.50, 在售
    pub latte: MenuItem,
    /// 4.00, 已下架
    pub scone: MenuItem,
}

pub async fn seed_fixture(state: &ServerState) -> Fixture {
    let pool = state.pool();

    let customer = customer::create(
        pool,
        CustomerCreate {
            name: "Walk-in".to_string(),
            phone: Some("555-0100".to_string()),
            email: None,
        },
    )
    .await
    .expect("create customer");

    let drinks = category::create(
        pool,
        CategoryCreate {
            name: "Drinks".to_string(),
            sort_order: Some(1),
        },
    )
    .await
    .expect("create category");

    let espresso = menu_item::create(
        pool,
        MenuItemCreate {
            category_id: drinks.id,
            name: "Espresso".to_string(),
            price: dec("2.50"),
            is_available: Some(true),
        },
    )
    .await
    .expect("create espresso");

    let latte = menu_item::create(
        pool,
        MenuItemCreate {
            category_id: drinks.id,
            name: "Latte".to_string(),
            price: dec("3.50"),
            is_available: Some(true),
        },
    )
    .await
    .expect("create latte");

    let scone = menu_item::create(
        pool,
        MenuItemCreate {
            category_id: drinks.id,
            name: "Scone".to_string(),
            price: dec("4.00"),
            is_available: Some(false),
        },
    )
    .await
    .expect("create scone");

    Fixture {
        customer,
        espresso,
        latte,
        scone,
    }
}
