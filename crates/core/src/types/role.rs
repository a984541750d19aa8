//! Account roles issued by the PartsGrid backend.

use serde::{Deserialize, Serialize};

/// Role carried in the session token's `role` claim.
///
/// The wire spellings are fixed by the backend and use hyphenated
/// title-case, so each variant carries an explicit rename.
///
/// Roles are advisory on the client: they gate which dashboards and
/// navigation entries are shown. Every mutating call is re-authorized by
/// the backend regardless of what the client believes its role to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Super-admin")]
    SuperAdmin,
    #[serde(rename = "Fulfillment-Admin")]
    FulfillmentAdmin,
    #[serde(rename = "Fulfillment-Staff")]
    FulfillmentStaff,
    #[serde(rename = "Inventory-Admin")]
    InventoryAdmin,
    #[serde(rename = "Inventory-Staff")]
    InventoryStaff,
    #[serde(rename = "Dealer")]
    Dealer,
    #[serde(rename = "User")]
    User,
    #[serde(rename = "Customer-Support")]
    CustomerSupport,
}

impl Role {
    /// Whether this role belongs to the administrative back-office.
    #[must_use]
    pub const fn is_back_office(self) -> bool {
        !matches!(self, Self::Dealer | Self::User)
    }

    /// The wire spelling of this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "Super-admin",
            Self::FulfillmentAdmin => "Fulfillment-Admin",
            Self::FulfillmentStaff => "Fulfillment-Staff",
            Self::InventoryAdmin => "Inventory-Admin",
            Self::InventoryStaff => "Inventory-Staff",
            Self::Dealer => "Dealer",
            Self::User => "User",
            Self::CustomerSupport => "Customer-Support",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
