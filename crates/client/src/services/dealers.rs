//! Dealers service.
//!
//! Besides the plain endpoints this module owns the dealer-id resolver
//! chain: an ordered list of fallback sources tried strictly in order,
//! first success wins. The chain exists because not every session carries
//! a dealer binding the same way - back-office staff acting on behalf of
//! a dealer have it server-side only, dealer logins carry it in the token.

use thiserror::Error;
use tracing::{debug, instrument, warn};

use partsgrid_core::{DealerId, Envelope};

use crate::api::{ApiClient, ApiError, EnvelopeExt};
use crate::cookies::{self, CookieOptions, SharedJar};
use crate::models::{Dealer, DealerStatistics};
use crate::token;

/// Error from exhausting the dealer-id resolver chain.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// Every source in the chain came up empty.
    #[error("Dealer ID not found")]
    DealerIdNotFound,
}

/// One source in the resolver chain, in documentation order.
#[derive(Debug, Clone, Copy)]
enum DealerIdSource {
    /// The dedicated lookup endpoint (`/dealers/me`).
    Lookup,
    /// The cached `dealer_id` cookie.
    Cookie,
    /// The `dealerId` claim of the current token.
    Token,
}

/// Strict resolution order; the first source that produces an id
/// short-circuits the rest.
const RESOLUTION_ORDER: [DealerIdSource; 3] = [
    DealerIdSource::Lookup,
    DealerIdSource::Cookie,
    DealerIdSource::Token,
];

/// Dealer operations over the shared client and jar.
pub struct DealersService<'a> {
    client: &'a ApiClient,
    jar: &'a SharedJar,
}

impl<'a> DealersService<'a> {
    /// Create a new dealers service.
    #[must_use]
    pub const fn new(client: &'a ApiClient, jar: &'a SharedJar) -> Self {
        Self { client, jar }
    }

    /// Fetch the dealer the session is bound to.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure, including `404` for sessions with
    /// no dealer binding.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<Dealer, ApiError> {
        self.client.get("/dealers/me").await?.into_data()
    }

    /// Dashboard statistics - the intentional soft-failure endpoint.
    ///
    /// A dashboard with no numbers is better than a dashboard that
    /// errors, so failures come back as a `success: false` envelope value
    /// instead of an `Err`.
    #[instrument(skip(self))]
    pub async fn statistics(&self) -> Envelope<DealerStatistics> {
        match self.client.get("/dealers/statistics").await {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!(error = %err, "dealer statistics unavailable, soft-failing");
                Envelope::failure(err.user_message())
            }
        }
    }

    /// Resolve the session's dealer id through the fallback chain:
    /// lookup endpoint → `dealer_id` cookie → token claim.
    ///
    /// A successful resolution writes the id back to the cookie so the
    /// cheap cookie source hits next time.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::DealerIdNotFound`] when every source is
    /// exhausted.
    #[instrument(skip(self))]
    pub async fn resolve_dealer_id(&self) -> Result<DealerId, ResolutionError> {
        for source in RESOLUTION_ORDER {
            if let Some(id) = self.try_source(source).await {
                debug!(?source, dealer_id = %id, "dealer id resolved");
                self.jar
                    .set(cookies::DEALER_ID, &id.to_string(), CookieOptions::default());
                return Ok(id);
            }
        }
        Err(ResolutionError::DealerIdNotFound)
    }

    async fn try_source(&self, source: DealerIdSource) -> Option<DealerId> {
        match source {
            DealerIdSource::Lookup => match self.me().await {
                Ok(dealer) => Some(dealer.id),
                Err(err) => {
                    debug!(error = %err, "dealer lookup failed, trying next source");
                    None
                }
            },
            DealerIdSource::Cookie => self
                .jar
                .get(cookies::DEALER_ID)
                .and_then(|raw| raw.parse::<i64>().ok())
                .map(DealerId::new),
            DealerIdSource::Token => self
                .jar
                .get(cookies::TOKEN)
                .and_then(|raw| token::decode(&raw).ok())
                .and_then(|claims| claims.dealer_id),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::cookies::CookieJar;
    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use std::sync::Arc;
    use std::time::Duration;
    use url::Url;

    /// Client pointed at a dead port so the lookup source always fails
    /// fast, exercising the fallback steps.
    fn offline_client(jar: &SharedJar) -> ApiClient {
        let config = ClientConfig::for_base_url(Url::parse("http://127.0.0.1:9/api/v1").unwrap())
            .with_request_timeout(Duration::from_millis(200));
        ApiClient::new(&config, Arc::clone(jar)).unwrap()
    }

    #[tokio::test]
    async fn test_cookie_source_wins_when_lookup_fails() {
        let jar = CookieJar::shared();
        jar.set(cookies::DEALER_ID, "42", CookieOptions::default());
        let client = offline_client(&jar);
        let dealers = DealersService::new(&client, &jar);
        assert_eq!(
            dealers.resolve_dealer_id().await.unwrap(),
            DealerId::new(42)
        );
    }

    #[tokio::test]
    async fn test_token_source_is_last_resort() {
        let jar = CookieJar::shared();
        let payload = serde_json::json!({"dealerId": 77, "exp": 2_000_000_000i64});
        let token = format!(
            "h.{}.s",
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&payload).unwrap())
        );
        jar.set(cookies::TOKEN, &token, CookieOptions::default());
        let client = offline_client(&jar);
        let dealers = DealersService::new(&client, &jar);

        let resolved = dealers.resolve_dealer_id().await.unwrap();
        assert_eq!(resolved, DealerId::new(77));
        // The resolution was written back for the cookie source.
        assert_eq!(jar.get(cookies::DEALER_ID).as_deref(), Some("77"));
    }

    #[tokio::test]
    async fn test_exhausted_chain_errors() {
        let jar = CookieJar::shared();
        let client = offline_client(&jar);
        let dealers = DealersService::new(&client, &jar);
        let err = dealers.resolve_dealer_id().await.unwrap_err();
        assert_eq!(err.to_string(), "Dealer ID not found");
    }

    #[tokio::test]
    async fn test_unparseable_cookie_falls_through() {
        let jar = CookieJar::shared();
        jar.set(cookies::DEALER_ID, "not-a-number", CookieOptions::default());
        let client = offline_client(&jar);
        let dealers = DealersService::new(&client, &jar);
        assert!(dealers.resolve_dealer_id().await.is_err());
    }

    #[tokio::test]
    async fn test_statistics_soft_fails_offline() {
        let jar = CookieJar::shared();
        let client = offline_client(&jar);
        let dealers = DealersService::new(&client, &jar);
        let envelope = dealers.statistics().await;
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert!(!envelope.message.is_empty());
    }
}
