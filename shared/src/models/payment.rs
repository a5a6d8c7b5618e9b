//! Payment Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment method (支付方式)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    Mobile,
}

impl PaymentMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Card => "CARD",
            PaymentMethod::Mobile => "MOBILE",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CASH" => Ok(PaymentMethod::Cash),
            "CARD" => Ok(PaymentMethod::Card),
            "MOBILE" => Ok(PaymentMethod::Mobile),
            other => Err(format!("unknown payment method: {other}")),
        }
    }
}

/// Payment status (支付状态)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Completed,
    Refunded,
}

impl PaymentStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Completed => "COMPLETED",
            PaymentStatus::Refunded => "REFUNDED",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COMPLETED" => Ok(PaymentStatus::Completed),
            "REFUNDED" => Ok(PaymentStatus::Refunded),
            other => Err(format!("unknown payment status: {other}")),
        }
    }
}

/// Payment entity (支付记录)
///
/// At most one payment per order (unique index). `amount` equals the order
/// total at payment time. A refund flips status to REFUNDED; the row is
/// never deleted or re-created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub order_id: i64,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub status: PaymentStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

// ====== Request DTOs ======

/// Process payment payload (`POST /api/orders/{id}/payments`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCreate {
    pub method: PaymentMethod,
    pub transaction_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_str_roundtrip() {
        for method in [PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::Mobile] {
            assert_eq!(PaymentMethod::from_str(method.as_str()), Ok(method));
        }
    }

    #[test]
    fn test_status_str_roundtrip() {
        for status in [PaymentStatus::Completed, PaymentStatus::Refunded] {
            assert_eq!(PaymentStatus::from_str(status.as_str()), Ok(status));
        }
    }

    #[test]
    fn test_method_serde() {
        let json = serde_json::to_string(&PaymentMethod::Cash).unwrap();
        assert_eq!(json, "\"CASH\"");
        assert!(serde_json::from_str::<PaymentMethod>("\"BITCOIN\"").is_err());
    }
}
