//! Wire types for the marketplace REST API.
//!
//! These structs mirror the JSON the backend serves (camelCase keys) and
//! are what the service modules shape responses into and the store slices
//! cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use partsgrid_core::{
    DealerId, Email, NotificationId, NotificationKind, OrderId, OrderStatus, PaymentId,
    PaymentStatus, Price, ProductId, ReturnId, ReturnStatus, Role, UserId,
};

/// An authenticated session, derived from a login response.
#[derive(Debug, Clone)]
pub struct Session {
    /// The bearer token exactly as issued.
    pub token: String,
    /// Account id from the token claims.
    pub user_id: Option<UserId>,
    /// Role from the token claims (advisory).
    pub role: Option<Role>,
    /// Dealer binding from the token claims, if any.
    pub dealer_id: Option<DealerId>,
    /// Expiry derived from the `exp` claim.
    pub expires_at: DateTime<Utc>,
}

/// The logged-in account's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
    #[serde(default)]
    pub dealer_id: Option<DealerId>,
}

/// A marketplace order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub total: Price,
    #[serde(default)]
    pub dealer_id: Option<DealerId>,
}

/// One line of an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Price,
}

/// A catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: Price,
    pub in_stock: bool,
}

/// A dealer account visible to the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dealer {
    pub id: DealerId,
    pub name: String,
    pub city: String,
    pub pincode: String,
    pub active: bool,
}

/// Aggregate figures for a dealer dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerStatistics {
    pub orders_today: u64,
    pub orders_total: u64,
    pub revenue_total: Price,
    pub pending_returns: u64,
}

/// A payment record attached to an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub order_id: OrderId,
    pub status: PaymentStatus,
    pub amount: Price,
    #[serde(default)]
    pub captured_at: Option<DateTime<Utc>>,
}

/// A return request raised against an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    pub id: ReturnId,
    pub order_id: OrderId,
    pub status: ReturnStatus,
    pub reason: String,
    pub requested_at: DateTime<Utc>,
}

/// A notification pushed to the session's account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Outcome of a catalog bulk import.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub total: u32,
    pub imported: u32,
    pub failed: u32,
}

/// One row of a catalog bulk import.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRow {
    pub sku: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: Price,
}

/// Delivery serviceability of a pincode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Serviceability {
    pub pincode: String,
    pub serviceable: bool,
    #[serde(default)]
    pub eta_days: Option<u32>,
    pub dealer_count: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_deserializes_camel_case() {
        let json = r#"{
            "id": 9001,
            "status": "CONFIRMED",
            "placedAt": "2026-07-01T10:15:00Z",
            "items": [
                {"productId": 55, "name": "Brake pad set", "quantity": 2,
                 "unitPrice": {"amount": "1499.00", "currencyCode": "INR"}}
            ],
            "total": {"amount": "2998.00", "currencyCode": "INR"},
            "dealerId": 7
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, OrderId::new(9001));
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.dealer_id, Some(DealerId::new(7)));
    }

    #[test]
    fn test_serviceability_optional_eta() {
        let json = r#"{"pincode": "560001", "serviceable": false, "dealerCount": 0}"#;
        let s: Serviceability = serde_json::from_str(json).unwrap();
        assert!(!s.serviceable);
        assert!(s.eta_days.is_none());
    }
}
