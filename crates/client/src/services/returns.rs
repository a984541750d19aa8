//! Returns service.
//!
//! Buyer-side return requests plus the back-office approve/reject calls.
//! The return workflow itself (pickup, refund) is backend-owned; this
//! module only invokes it.

use serde::Serialize;
use tracing::instrument;

use partsgrid_core::{OrderId, Paged, ReturnId};

use crate::api::{ApiClient, ApiError, EnvelopeExt};
use crate::models::ReturnRequest;
use crate::services::PageQuery;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewReturn<'a> {
    order_id: OrderId,
    reason: &'a str,
}

#[derive(Serialize)]
struct Rejection<'a> {
    reason: &'a str,
}

/// Return-request operations over the shared client.
pub struct ReturnsService<'a> {
    client: &'a ApiClient,
}

impl<'a> ReturnsService<'a> {
    /// Create a new returns service.
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List return requests visible to the session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &PageQuery) -> Result<Paged<ReturnRequest>, ApiError> {
        self.client
            .get_with_query("/returns", query)
            .await?
            .into_data()
    }

    /// Raise a return request against an order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    #[instrument(skip(self, reason), fields(order_id = %order_id))]
    pub async fn request(
        &self,
        order_id: OrderId,
        reason: &str,
    ) -> Result<ReturnRequest, ApiError> {
        self.client
            .post("/returns", &NewReturn { order_id, reason })
            .await?
            .into_data()
    }

    /// Approve a return request (back-office).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    #[instrument(skip(self), fields(return_id = %id))]
    pub async fn approve(&self, id: ReturnId) -> Result<ReturnRequest, ApiError> {
        self.client
            .post_empty(&format!("/returns/{id}/approve"))
            .await?
            .into_data()
    }

    /// Reject a return request with a reason (back-office).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    #[instrument(skip(self, reason), fields(return_id = %id))]
    pub async fn reject(&self, id: ReturnId, reason: &str) -> Result<ReturnRequest, ApiError> {
        self.client
            .post(&format!("/returns/{id}/reject"), &Rejection { reason })
            .await?
            .into_data()
    }
}
