//! The shared HTTP client for the marketplace REST API.
//!
//! # Architecture
//!
//! - One [`ApiClient`] per process, cheaply cloneable via `Arc`
//! - An explicit, ordered request-interceptor chain (bearer-token
//!   injection from the cookie jar) applied before every dispatch
//! - Response outcomes logged via `tracing` on both paths; errors are
//!   re-raised unchanged, never swallowed and never retried
//! - A fixed request timeout (45 s by default) distinguishable from other
//!   transport failures as [`ApiError::Timeout`]
//!
//! # Example
//!
//! ```rust,ignore
//! use partsgrid_client::api::{ApiClient, EnvelopeExt};
//!
//! let client = ApiClient::new(&config, jar)?;
//! let orders: Paged<Order> = client.get("/orders").await?.into_data()?;
//! ```

mod error;
mod interceptor;

pub use error::ApiError;
pub use interceptor::{BearerAuth, RequestInterceptor};

use std::sync::Arc;

use reqwest::RequestBuilder;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use partsgrid_core::Envelope;

use crate::config::ClientConfig;
use crate::cookies::SharedJar;

/// Shared client for all outbound marketplace API traffic.
///
/// Every service module issues its requests through one of these; the
/// interceptor chain and timeout are fixed at construction.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    /// Base URL with any trailing slash trimmed; paths are appended as-is.
    base_url: String,
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl ApiClient {
    /// Create a client from configuration, with the bearer interceptor
    /// reading from `jar` installed first in the chain.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: &ClientConfig, jar: SharedJar) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()
            .map_err(ApiError::from_transport)?;

        let interceptors: Vec<Arc<dyn RequestInterceptor>> = vec![Arc::new(BearerAuth::new(jar))];

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                interceptors,
            }),
        })
    }

    /// Append an interceptor to the end of the chain.
    ///
    /// Only possible while the client has a single owner, i.e. during
    /// construction, before clones are handed out.
    #[must_use]
    pub fn with_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        if let Some(inner) = Arc::get_mut(&mut self.inner) {
            inner.interceptors.push(interceptor);
        }
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    // =========================================================================
    // Typed helpers
    // =========================================================================

    /// GET a path, expecting an enveloped response.
    ///
    /// # Errors
    ///
    /// See [`ApiError`] for the full taxonomy.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, ApiError> {
        let builder = self.inner.http.get(self.url(path));
        self.run(builder).await
    }

    /// GET a path with query parameters.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.inner.http.get(self.url(path)).query(query);
        self.run(builder).await
    }

    /// POST a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.inner.http.post(self.url(path)).json(body);
        self.run(builder).await
    }

    /// POST with no body (acknowledge-style mutations).
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Envelope<T>, ApiError> {
        let builder = self.inner.http.post(self.url(path));
        self.run(builder).await
    }

    /// PATCH a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.inner.http.patch(self.url(path)).json(body);
        self.run(builder).await
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Build, intercept, send, log, and parse one request.
    ///
    /// The body is read as text before parsing so failure logs can carry
    /// diagnostics even for unparseable responses.
    async fn run<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Envelope<T>, ApiError> {
        let mut request = builder.build().map_err(ApiError::from_transport)?;

        for interceptor in &self.inner.interceptors {
            interceptor.intercept(&mut request);
        }

        let method = request.method().clone();
        let url = request.url().clone();

        let response = match self.inner.http.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                if err.is_timeout() {
                    error!(method = %method, url = %url, "request timed out");
                    return Err(ApiError::Timeout);
                }
                error!(method = %method, url = %url, error = %err, "request failed");
                return Err(ApiError::Transport(err));
            }
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(ApiError::from_transport)?;

        if !status.is_success() {
            error!(
                method = %method,
                url = %url,
                status = %status,
                body = %truncate(&body, 500),
                "request rejected"
            );
            return Err(ApiError::status_from_body(status, body));
        }

        debug!(method = %method, url = %url, status = %status, "request completed");

        serde_json::from_str(&body).map_err(|err| {
            error!(
                method = %method,
                url = %url,
                error = %err,
                body = %truncate(&body, 500),
                "failed to parse response envelope"
            );
            ApiError::Parse(err)
        })
    }
}

fn truncate(body: &str, limit: usize) -> String {
    body.chars().take(limit).collect()
}

/// Unwrap helpers for enveloped responses.
pub trait EnvelopeExt<T> {
    /// Convert a success envelope into its payload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Backend`] when the envelope reports
    /// `success: false` or omits its payload.
    fn into_data(self) -> Result<T, ApiError>;

    /// Check the envelope's `success` flag, discarding any payload.
    /// For acknowledge-style mutations that return no data.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Backend`] when the envelope reports
    /// `success: false`.
    fn ensure_success(self) -> Result<(), ApiError>;
}

impl<T> EnvelopeExt<T> for Envelope<T> {
    fn into_data(self) -> Result<T, ApiError> {
        if !self.success {
            let message = if self.message.is_empty() {
                "backend reported failure".to_string()
            } else {
                self.message
            };
            return Err(ApiError::Backend(message));
        }
        self.data
            .ok_or_else(|| ApiError::Backend("response missing data".to_string()))
    }

    fn ensure_success(self) -> Result<(), ApiError> {
        if self.success {
            return Ok(());
        }
        let message = if self.message.is_empty() {
            "backend reported failure".to_string()
        } else {
            self.message
        };
        Err(ApiError::Backend(message))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cookies::CookieJar;
    use url::Url;

    fn client_for(base: &str) -> ApiClient {
        let config = ClientConfig::for_base_url(Url::parse(base).unwrap());
        ApiClient::new(&config, CookieJar::shared()).unwrap()
    }

    #[test]
    fn test_url_join_trims_trailing_slash() {
        let client = client_for("http://localhost:4000/api/v1/");
        assert_eq!(client.url("/orders"), "http://localhost:4000/api/v1/orders");
    }

    #[test]
    fn test_into_data_success() {
        let env = Envelope {
            success: true,
            message: "ok".to_string(),
            data: Some(7),
        };
        assert_eq!(env.into_data().unwrap(), 7);
    }

    #[test]
    fn test_into_data_failure_uses_message() {
        let env: Envelope<i32> = Envelope::failure("no such order".to_string());
        let err = env.into_data().unwrap_err();
        assert_eq!(err.user_message(), "no such order");
    }

    #[test]
    fn test_into_data_missing_payload() {
        let env: Envelope<i32> = Envelope {
            success: true,
            message: String::new(),
            data: None,
        };
        assert!(matches!(env.into_data(), Err(ApiError::Backend(_))));
    }
}
