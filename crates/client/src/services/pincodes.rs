//! Pincode serviceability service.
//!
//! Serviceability is checked on every product page and address form, so
//! answers are cached in-memory for 5 minutes. The cache sits in front of
//! the endpoint only - it is unrelated to the store slices, which hold
//! whatever was last dispatched into them without any TTL.

use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument};

use crate::api::{ApiClient, ApiError, EnvelopeExt};
use crate::models::Serviceability;

/// Cached answers per pincode.
const CACHE_CAPACITY: u64 = 10_000;

/// How long a serviceability answer stays fresh.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Serviceability lookups with a read-through cache.
///
/// Owns its client clone so the cache can outlive any one call site.
#[derive(Clone)]
pub struct PincodeService {
    client: ApiClient,
    cache: Cache<String, Serviceability>,
}

impl PincodeService {
    /// Create a new serviceability service.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();
        Self { client, cache }
    }

    /// Check whether a pincode is serviceable.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure. Failures are not cached.
    #[instrument(skip(self))]
    pub async fn check(&self, pincode: &str) -> Result<Serviceability, ApiError> {
        if let Some(hit) = self.cache.get(pincode).await {
            debug!("serviceability cache hit");
            return Ok(hit);
        }

        let answer: Serviceability = self
            .client
            .get(&format!("/pincodes/{pincode}"))
            .await?
            .into_data()?;

        self.cache
            .insert(pincode.to_string(), answer.clone())
            .await;
        Ok(answer)
    }

    /// Drop the cached answer for one pincode.
    pub async fn invalidate(&self, pincode: &str) {
        self.cache.invalidate(pincode).await;
    }

    /// Drop every cached answer.
    pub async fn invalidate_all(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }
}
