//! Typed order event payloads

use crate::models::OrderDetail;
use serde::{Deserialize, Serialize};

/// What happened to the order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderEventAction {
    Created,
    Updated,
}

impl OrderEventAction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderEventAction::Created => "created",
            OrderEventAction::Updated => "updated",
        }
    }
}

/// Order event carried on the bus
///
/// `version` increases monotonically per resource so late consumers can
/// order events and pollers can detect staleness. The payload is the full
/// denormalized order (customer, items with menu items, payment if any).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderEvent {
    pub action: OrderEventAction,
    pub version: u64,
    pub order: OrderDetail,
}

impl OrderEvent {
    pub fn created(version: u64, order: OrderDetail) -> Self {
        Self {
            action: OrderEventAction::Created,
            version,
            order,
        }
    }

    pub fn updated(version: u64, order: OrderDetail) -> Self {
        Self {
            action: OrderEventAction::Updated,
            version,
            order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serde() {
        assert_eq!(
            serde_json::to_string(&OrderEventAction::Created).unwrap(),
            "\"created\""
        );
        assert_eq!(
            serde_json::to_string(&OrderEventAction::Updated).unwrap(),
            "\"updated\""
        );
    }
}
