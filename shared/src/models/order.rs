//! Order Models
//!
//! Order aggregate: order header, line items, and the denormalized detail
//! view used by the API and the event bus.

use crate::models::{Customer, MenuItem, Payment};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order lifecycle status (订单状态)
///
/// | status    | meaning                        |
/// |-----------|--------------------------------|
/// | PENDING   | created, awaiting confirmation |
/// | CONFIRMED | cashier confirmed              |
/// | PAID      | payment collected              |
/// | PREPARING | chef started preparation       |
/// | READY     | ready for pickup/serving       |
/// | COMPLETED | handed over (terminal)         |
/// | CANCELLED | aborted (terminal)             |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Paid,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in lifecycle order (useful for table-driven tests)
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Paid,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// Canonical storage/wire representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Paid => "PAID",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// Terminal statuses have no outgoing transitions
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "CONFIRMED" => Ok(OrderStatus::Confirmed),
            "PAID" => Ok(OrderStatus::Paid),
            "PREPARING" => Ok(OrderStatus::Preparing),
            "READY" => Ok(OrderStatus::Ready),
            "COMPLETED" => Ok(OrderStatus::Completed),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

/// Order entity (订单)
///
/// `total_amount` is derived from the line items at creation and never
/// edited independently. `confirmed_by` and `prepared_by` are each written
/// exactly once, by the transition that produces them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    /// Human-readable unique number, e.g. `ORD-20250314-0042`
    pub order_number: String,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub notes: Option<String>,
    pub customer_id: i64,
    pub created_by: i64,
    pub confirmed_by: Option<i64>,
    pub prepared_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order line item (订单明细)
///
/// `unit_price` is a snapshot of the menu item price at order creation;
/// `total_price = quantity × unit_price`, exact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

// ====== Request DTOs ======

/// One requested line in an order creation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub menu_item_id: i64,
    pub quantity: i64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_id: i64,
    pub items: Vec<OrderItemInput>,
    pub notes: Option<String>,
}

/// Status transition request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: OrderStatus,
}

// ====== Detail views ======

/// Order line item with its menu item resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemDetail {
    pub item: OrderItem,
    pub menu_item: MenuItem,
}

/// Fully denormalized order: what `GET /api/orders/{id}` returns and what
/// order events carry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    pub order: Order,
    pub customer: Customer,
    pub items: Vec<OrderItemDetail>,
    pub payment: Option<Payment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_str_roundtrip() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::from_str(status.as_str()), Ok(status));
        }
    }

    #[test]
    fn test_status_from_str_rejects_unknown() {
        assert!(OrderStatus::from_str("OPEN").is_err());
        assert!(OrderStatus::from_str("pending").is_err());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Paid,
            OrderStatus::Preparing,
            OrderStatus::Ready,
        ] {
            assert!(!status.is_terminal(), "{status} must not be terminal");
        }
    }

    #[test]
    fn test_status_serde_screaming_snake() {
        let json = serde_json::to_string(&OrderStatus::Preparing).unwrap();
        assert_eq!(json, "\"PREPARING\"");
        let status: OrderStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(status, OrderStatus::Cancelled);
    }
}
