//! Domain service modules.
//!
//! One module per backend resource. Each service is a thin borrow-wrapper
//! over the shared [`ApiClient`](crate::api::ApiClient) exposing typed
//! methods: one method issues exactly one request (the dealer-id resolver
//! chain being the documented exception), shapes the enveloped response,
//! and re-raises transport failures after logging context. No service
//! retries anything - at-most-once semantics; idempotence, if any, is the
//! backend's responsibility.

pub mod auth;
pub mod dealers;
pub mod notifications;
pub mod orders;
pub mod payments;
pub mod pincodes;
pub mod products;
pub mod returns;

use serde::Serialize;

/// Common pagination query parameters for list endpoints.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// 1-based page to fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl PageQuery {
    /// The first page at the backend's default size.
    #[must_use]
    pub const fn first() -> Self {
        Self {
            page: Some(1),
            per_page: None,
        }
    }
}
