//! Request interceptors.
//!
//! The [`ApiClient`](super::ApiClient) applies an explicit, ordered list of
//! interceptors to every outgoing request before dispatch. Keeping the
//! chain as a plain `Vec` (rather than hidden global registration) makes
//! the application order visible at construction time.
//!
//! Interceptors must never fail the request: an interceptor that cannot do
//! its job (no token, unencodable header value) leaves the request
//! unchanged.

use reqwest::Request;
use reqwest::header::{AUTHORIZATION, HeaderValue};

use crate::cookies::{self, SharedJar};

/// A transform applied to every outgoing request.
pub trait RequestInterceptor: Send + Sync {
    /// Mutate the request in place. Must not fail.
    fn intercept(&self, request: &mut Request);
}

/// Attaches `Authorization: Bearer <token>` when a token cookie is
/// present; with no cookie the request proceeds unauthenticated.
pub struct BearerAuth {
    jar: SharedJar,
}

impl BearerAuth {
    /// Create a bearer interceptor reading from the given jar.
    #[must_use]
    pub const fn new(jar: SharedJar) -> Self {
        Self { jar }
    }
}

impl RequestInterceptor for BearerAuth {
    fn intercept(&self, request: &mut Request) {
        let Some(token) = self.jar.get(cookies::TOKEN) else {
            return;
        };
        // A token that cannot be encoded as a header value is skipped
        // rather than failing the request.
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}")) {
            request.headers_mut().insert(AUTHORIZATION, value);
        }
    }
}
