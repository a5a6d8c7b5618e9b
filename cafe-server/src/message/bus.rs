//! In-process order event bus
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │                EventBus                   │
//! │  ┌────────────────────────────────────┐  │
//! │  │  broadcast::Sender<OrderEvent>     │  │
//! │  └────────────────────────────────────┘  │
//! │  ┌────────────────────────────────────┐  │
//! │  │  ResourceVersions (DashMap)        │  │
//! │  └────────────────────────────────────┘  │
//! └────────────────────┬─────────────────────┘
//!                      │ subscribe()
//!          ┌───────────┼───────────┐
//!          ▼           ▼           ▼
//!      测试订阅者    轮询缓存     未来的推送层
//! ```
//!
//! 发布永不失败：没有订阅者时事件直接丢弃，业务流程不受影响。

use dashmap::DashMap;
use tokio::sync::broadcast;

use shared::message::{OrderDetail, OrderEvent};

/// 默认广播通道容量
const DEFAULT_CAPACITY: usize = 1024;

/// 订单资源的版本键
pub const RESOURCE_ORDERS: &str = "orders";

/// 资源版本管理器
///
/// 使用 DashMap 实现无锁并发的版本号管理。
/// 每种资源类型维护独立的版本号，支持原子递增。
///
/// # 使用场景
///
/// 发布事件时自动生成递增的版本号，
/// 确保订阅者可以通过版本号判断数据新旧。
#[derive(Debug)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    /// 创建空的版本管理器
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// 递增指定资源的版本号并返回新值
    ///
    /// 如果资源不存在，从 0 开始递增（返回 1）
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// 获取指定资源的当前版本号
    ///
    /// 如果资源不存在，返回 0
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

impl Default for ResourceVersions {
    fn default() -> Self {
        Self::new()
    }
}

/// 订单事件总线
///
/// 每条事件携带完整的订单快照 ([`OrderDetail`])，订阅者无需回查数据库。
#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<OrderEvent>,
    versions: ResourceVersions,
}

impl EventBus {
    /// 创建默认容量的总线
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// 创建指定容量的总线
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            versions: ResourceVersions::new(),
        }
    }

    /// 订阅全部订单事件
    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.tx.subscribe()
    }

    /// 当前活跃订阅者数量
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// 发布订单创建事件，返回分配的版本号
    pub fn publish_created(&self, order: OrderDetail) -> u64 {
        let version = self.versions.increment(RESOURCE_ORDERS);
        self.publish(OrderEvent::created(version, order))
    }

    /// 发布订单变更事件 (状态流转、收款、退款)，返回分配的版本号
    pub fn publish_updated(&self, order: OrderDetail) -> u64 {
        let version = self.versions.increment(RESOURCE_ORDERS);
        self.publish(OrderEvent::updated(version, order))
    }

    /// 获取指定资源的当前版本号
    pub fn current_version(&self, resource: &str) -> u64 {
        self.versions.get(resource)
    }

    fn publish(&self, event: OrderEvent) -> u64 {
        let version = event.version;
        let order_id = event.order.order.id;
        let action = event.action;

        match self.tx.send(event) {
            Ok(receivers) => {
                tracing::debug!(order_id, version, ?action, receivers, "order event published");
            }
            Err(_) => {
                // 没有活跃订阅者，正常情况
                tracing::trace!(order_id, version, ?action, "order event dropped, no subscribers");
            }
        }

        version
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::message::OrderEventAction;
    use shared::models::{Customer, Order, OrderStatus};

    fn sample_detail(order_id: i64) -> OrderDetail {
        OrderDetail {
            order: Order {
                id: order_id,
                order_number: format!("ORD-20250314-{order_id:04}"),
                status: OrderStatus::Pending,
                total_amount: Decimal::new(500, 2),
                notes: None,
                customer_id: 1,
                created_by: 1,
                confirmed_by: None,
                prepared_by: None,
                created_at: 0,
                updated_at: 0,
            },
            customer: Customer {
                id: 1,
                name: "Walk-in".to_string(),
                phone: None,
                email: None,
                created_at: 0,
                updated_at: 0,
            },
            items: vec![],
            payment: None,
        }
    }

    #[tokio::test]
    async fn test_publish_assigns_monotonic_versions() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        assert_eq!(bus.publish_created(sample_detail(1)), 1);
        assert_eq!(bus.publish_updated(sample_detail(1)), 2);

        let first = rx.recv().await.expect("first event");
        assert_eq!(first.action, OrderEventAction::Created);
        assert_eq!(first.version, 1);
        assert_eq!(first.order.order.id, 1);

        let second = rx.recv().await.expect("second event");
        assert_eq!(second.action, OrderEventAction::Updated);
        assert_eq!(second.version, 2);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_silent() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(), 0);

        // 不能因为没人听就失败
        assert_eq!(bus.publish_created(sample_detail(9)), 1);
        assert_eq!(bus.current_version(RESOURCE_ORDERS), 1);
    }

    #[tokio::test]
    async fn test_every_subscriber_sees_every_event() {
        let bus = EventBus::new();
        let mut rx_a = bus.subscribe();
        let mut rx_b = bus.subscribe();

        bus.publish_created(sample_detail(3));

        assert_eq!(rx_a.recv().await.expect("a").order.order.id, 3);
        assert_eq!(rx_b.recv().await.expect("b").order.order.id, 3);
    }
}
