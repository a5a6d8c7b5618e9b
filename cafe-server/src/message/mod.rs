//! 事件总线模块
//!
//! 订单的每次创建和变更都会在进程内总线上发布一条完整的
//! [`shared::message::OrderEvent`]。核心逻辑只依赖总线的发布接口，
//! 投递方式 (轮询、推送、测试内订阅) 是订阅方的事。

pub mod bus;

pub use bus::{EventBus, RESOURCE_ORDERS, ResourceVersions};
