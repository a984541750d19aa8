//! Payments service.

use tracing::instrument;

use partsgrid_core::{Paged, PaymentId};

use crate::api::{ApiClient, ApiError, EnvelopeExt};
use crate::models::Payment;
use crate::services::PageQuery;

/// Payment operations over the shared client.
pub struct PaymentsService<'a> {
    client: &'a ApiClient,
}

impl<'a> PaymentsService<'a> {
    /// Create a new payments service.
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List payments visible to the session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &PageQuery) -> Result<Paged<Payment>, ApiError> {
        self.client
            .get_with_query("/payments", query)
            .await?
            .into_data()
    }

    /// Fetch one payment.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    #[instrument(skip(self), fields(payment_id = %id))]
    pub async fn get(&self, id: PaymentId) -> Result<Payment, ApiError> {
        self.client
            .get(&format!("/payments/{id}"))
            .await?
            .into_data()
    }
}
