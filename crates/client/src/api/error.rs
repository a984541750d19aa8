//! API error taxonomy.

use reqwest::StatusCode;
use thiserror::Error;

use partsgrid_core::Envelope;

/// Errors surfaced by the [`ApiClient`](super::ApiClient) and the service
/// modules built on it.
///
/// The original error shape is preserved as far as possible so callers can
/// branch on it: transport failures carry the source error, status failures
/// carry the status and the raw body, timeouts are distinguishable from
/// other transport failures. Nothing is retried and nothing is swallowed.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure (DNS, connect, TLS, broken pipe).
    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The request exceeded the configured timeout ceiling.
    #[error("request timed out")]
    Timeout,

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Status {
        /// The response status code.
        status: StatusCode,
        /// User-facing message, extracted from the response envelope when
        /// the body parses, otherwise a generic fallback.
        message: String,
        /// The raw response body, untouched.
        body: String,
    },

    /// A 2xx response whose body failed to parse.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A 2xx response whose envelope reports `success: false`, or a
    /// success envelope missing its payload.
    #[error("{0}")]
    Backend(String),
}

impl ApiError {
    /// Classify a transport-layer error, keeping timeouts distinguishable.
    #[must_use]
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }

    /// The message a UI should show for this error.
    ///
    /// For status errors this is the backend's envelope message when one
    /// was present; everything else falls back to the Display impl.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } | Self::Backend(message) => message.clone(),
            other => other.to_string(),
        }
    }

    /// Whether this error indicates the session is no longer valid.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }

    pub(crate) fn status_from_body(status: StatusCode, body: String) -> Self {
        let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
            .ok()
            .map(|env| env.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("request failed with HTTP {status}"));
        Self::Status {
            status,
            message,
            body,
        }
    }
}
