//! Catalog service.

use serde::Serialize;
use tracing::instrument;

use partsgrid_core::{Paged, ProductId};

use crate::api::{ApiClient, ApiError, EnvelopeExt};
use crate::models::{ImportRow, ImportSummary, Product};

/// Filters for the catalog list endpoint.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

#[derive(Serialize)]
struct SearchQuery<'a> {
    q: &'a str,
}

/// Catalog operations over the shared client.
pub struct ProductsService<'a> {
    client: &'a ApiClient,
}

impl<'a> ProductsService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List catalog entries.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &ProductListQuery) -> Result<Paged<Product>, ApiError> {
        self.client
            .get_with_query("/products", query)
            .await?
            .into_data()
    }

    /// Fetch one catalog entry.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get(&self, id: ProductId) -> Result<Product, ApiError> {
        self.client
            .get(&format!("/products/{id}"))
            .await?
            .into_data()
    }

    /// Free-text search over the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Paged<Product>, ApiError> {
        self.client
            .get_with_query("/products/search", &SearchQuery { q: query })
            .await?
            .into_data()
    }

    /// Submit a catalog bulk import (inventory-admin dashboards).
    ///
    /// One request for the whole batch; the backend reports per-batch
    /// counts, not per-row errors.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub async fn import(&self, rows: &[ImportRow]) -> Result<ImportSummary, ApiError> {
        self.client
            .post("/products/import", rows)
            .await?
            .into_data()
    }
}
