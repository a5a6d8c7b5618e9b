//! Permission Definitions
//!
//! Role-based endpoint grants.
//!
//! ## 设计原则
//! - 权限只回答"谁能调用哪个接口"。订单状态怎么流转另有一张
//!   工作流表 ([`crate::orders::transitions`])，两张表各自独立判定
//! - 每个角色一份显式授权清单，没有隐式的 "all" 超级权限
//! - 超级管理员是观察者：管理账号和菜单，查看订单和报表，
//!   但不创建订单、不推进状态、不经手收款

use shared::models::StaffRole;

// ========== 权限常量 ==========

pub const USERS_MANAGE: &str = "users:manage";
pub const CUSTOMERS_READ: &str = "customers:read";
pub const CUSTOMERS_WRITE: &str = "customers:write";
pub const CATALOG_READ: &str = "catalog:read";
pub const CATALOG_WRITE: &str = "catalog:write";
pub const ORDERS_READ: &str = "orders:read";
pub const ORDERS_CREATE: &str = "orders:create";
pub const ORDERS_TRANSITION: &str = "orders:transition";
pub const PAYMENTS_READ: &str = "payments:read";
pub const PAYMENTS_PROCESS: &str = "payments:process";
pub const PAYMENTS_REFUND: &str = "payments:refund";
pub const STATISTICS_READ: &str = "statistics:read";

// ========== 角色授权清单 ==========

/// 前台：接待客人、开单、维护客户档案
pub const RECEPTION_PERMISSIONS: &[&str] = &[
    CUSTOMERS_READ,
    CUSTOMERS_WRITE,
    CATALOG_READ,
    ORDERS_READ,
    ORDERS_CREATE,
    ORDERS_TRANSITION,
];

/// 收银：前台能做的之外，独家经手收款和退款
pub const CASHIER_PERMISSIONS: &[&str] = &[
    CUSTOMERS_READ,
    CUSTOMERS_WRITE,
    CATALOG_READ,
    ORDERS_READ,
    ORDERS_CREATE,
    ORDERS_TRANSITION,
    PAYMENTS_READ,
    PAYMENTS_PROCESS,
    PAYMENTS_REFUND,
];

/// 后厨：看菜单和订单，推进出餐状态
pub const CHEF_PERMISSIONS: &[&str] = &[CATALOG_READ, ORDERS_READ, ORDERS_TRANSITION];

/// 超级管理员：账号与菜单管理加全量只读。
/// 注意清单里没有 `orders:create`、`orders:transition`、
/// `payments:process`，工作流表也同样拒绝该角色
pub const SUPER_ADMIN_PERMISSIONS: &[&str] = &[
    USERS_MANAGE,
    CUSTOMERS_READ,
    CATALOG_READ,
    CATALOG_WRITE,
    ORDERS_READ,
    PAYMENTS_READ,
    STATISTICS_READ,
];

/// 查询角色的接口授权清单
pub fn role_permissions(role: StaffRole) -> &'static [&'static str] {
    match role {
        StaffRole::Reception => RECEPTION_PERMISSIONS,
        StaffRole::Cashier => CASHIER_PERMISSIONS,
        StaffRole::Chef => CHEF_PERMISSIONS,
        StaffRole::SuperAdmin => SUPER_ADMIN_PERMISSIONS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has(role: StaffRole, permission: &str) -> bool {
        role_permissions(role).contains(&permission)
    }

    #[test]
    fn test_every_role_can_read_orders() {
        for role in StaffRole::ALL {
            assert!(has(role, ORDERS_READ), "{role} should read orders");
        }
    }

    #[test]
    fn test_super_admin_observes_but_never_operates() {
        // 超级管理员不开单、不流转、不收款、不退款
        assert!(!has(StaffRole::SuperAdmin, ORDERS_CREATE));
        assert!(!has(StaffRole::SuperAdmin, ORDERS_TRANSITION));
        assert!(!has(StaffRole::SuperAdmin, PAYMENTS_PROCESS));
        assert!(!has(StaffRole::SuperAdmin, PAYMENTS_REFUND));
        assert!(!has(StaffRole::SuperAdmin, CUSTOMERS_WRITE));

        // 只读与管理面保留
        assert!(has(StaffRole::SuperAdmin, USERS_MANAGE));
        assert!(has(StaffRole::SuperAdmin, CATALOG_WRITE));
        assert!(has(StaffRole::SuperAdmin, STATISTICS_READ));
    }

    #[test]
    fn test_only_cashier_touches_money() {
        for role in StaffRole::ALL {
            let expected = role == StaffRole::Cashier;
            assert_eq!(has(role, PAYMENTS_PROCESS), expected, "{role}");
            assert_eq!(has(role, PAYMENTS_REFUND), expected, "{role}");
        }
    }

    #[test]
    fn test_only_super_admin_manages_users_and_catalog() {
        for role in StaffRole::ALL {
            let expected = role == StaffRole::SuperAdmin;
            assert_eq!(has(role, USERS_MANAGE), expected, "{role}");
            assert_eq!(has(role, CATALOG_WRITE), expected, "{role}");
        }
    }

    #[test]
    fn test_chef_is_kitchen_scoped() {
        assert_eq!(
            role_permissions(StaffRole::Chef),
            &[CATALOG_READ, ORDERS_READ, ORDERS_TRANSITION]
        );
    }
}
