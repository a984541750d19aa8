//! Orders service.

use serde::Serialize;
use tracing::instrument;

use partsgrid_core::{DealerId, OrderId, OrderStatus, Paged};

use crate::api::{ApiClient, ApiError, EnvelopeExt};
use crate::models::Order;

/// Filters for the orders list endpoint.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dealer_id: Option<DealerId>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusUpdate {
    status: OrderStatus,
}

/// Order operations over the shared client.
pub struct OrdersService<'a> {
    client: &'a ApiClient,
}

impl<'a> OrdersService<'a> {
    /// Create a new orders service.
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List orders visible to the session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &OrderListQuery) -> Result<Paged<Order>, ApiError> {
        self.client
            .get_with_query("/orders", query)
            .await?
            .into_data()
    }

    /// Fetch one order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get(&self, id: OrderId) -> Result<Order, ApiError> {
        self.client.get(&format!("/orders/{id}")).await?.into_data()
    }

    /// Cancel an order.
    ///
    /// At-most-once: calling this twice issues the request twice; the
    /// backend decides what a second cancel means.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure - including the backend rejecting
    /// a cancel outside the cancellable window.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn cancel(&self, id: OrderId) -> Result<Order, ApiError> {
        self.client
            .post_empty(&format!("/orders/{id}/cancel"))
            .await?
            .into_data()
    }

    /// Move an order to a new fulfillment status (back-office dashboards).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    #[instrument(skip(self), fields(order_id = %id, status = ?status))]
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        self.client
            .patch(&format!("/orders/{id}/status"), &StatusUpdate { status })
            .await?
            .into_data()
    }
}
