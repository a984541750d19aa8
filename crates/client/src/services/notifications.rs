//! Notifications service.

use tracing::instrument;

use partsgrid_core::NotificationId;

use crate::api::{ApiClient, ApiError, EnvelopeExt};
use crate::models::Notification;

/// Notification operations over the shared client.
pub struct NotificationsService<'a> {
    client: &'a ApiClient,
}

impl<'a> NotificationsService<'a> {
    /// Create a new notifications service.
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Fetch the account's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Notification>, ApiError> {
        self.client.get("/notifications").await?.into_data()
    }

    /// Mark one notification read.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    #[instrument(skip(self), fields(notification_id = %id))]
    pub async fn mark_read(&self, id: NotificationId) -> Result<(), ApiError> {
        self.client
            .post_empty::<serde_json::Value>(&format!("/notifications/{id}/read"))
            .await?
            .ensure_success()
    }

    /// Mark every notification read.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    #[instrument(skip(self))]
    pub async fn mark_all_read(&self) -> Result<(), ApiError> {
        self.client
            .post_empty::<serde_json::Value>("/notifications/read-all")
            .await?
            .ensure_success()
    }
}
