//! Status enums for marketplace entities.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Placed,
    Confirmed,
    Packed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether an order in this status can still be cancelled by the buyer.
    #[must_use]
    pub const fn is_cancellable(self) -> bool {
        matches!(self, Self::Placed | Self::Confirmed)
    }
}

/// Return request status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnStatus {
    #[default]
    Requested,
    Approved,
    Rejected,
    PickedUp,
    Refunded,
}

/// Payment settlement status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Authorized,
    Captured,
    Failed,
    Refunded,
}

/// Notification categories pushed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    OrderUpdate,
    ReturnUpdate,
    PaymentUpdate,
    Announcement,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_format() {
        let json = serde_json::to_string(&OrderStatus::Shipped).unwrap();
        assert_eq!(json, "\"SHIPPED\"");
        let back: OrderStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(back, OrderStatus::Cancelled);
    }

    #[test]
    fn test_cancellable_window() {
        assert!(OrderStatus::Placed.is_cancellable());
        assert!(OrderStatus::Confirmed.is_cancellable());
        assert!(!OrderStatus::Shipped.is_cancellable());
        assert!(!OrderStatus::Delivered.is_cancellable());
    }

    #[test]
    fn test_notification_kind_snake_case() {
        let json = serde_json::to_string(&NotificationKind::OrderUpdate).unwrap();
        assert_eq!(json, "\"order_update\"");
    }
}
