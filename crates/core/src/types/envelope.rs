//! The REST response envelope used by every PartsGrid endpoint.
//!
//! All endpoints answer `{ success, message, data }`; list endpoints
//! additionally nest a `pagination` object inside `data`.

use serde::{Deserialize, Serialize};

/// Standard response envelope.
///
/// `data` is absent on most failures and on mutations that only
/// acknowledge (`message` carries the human-readable outcome either way).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Whether the backend considers the operation successful.
    pub success: bool,
    /// Human-readable outcome, also used for user-facing error display.
    #[serde(default)]
    pub message: String,
    /// The payload, when the operation produces one.
    #[serde(default = "none", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

// serde(default) needs a fn for generic Option<T> without T: Default
const fn none<T>() -> Option<T> {
    None
}

impl<T> Envelope<T> {
    /// A failure envelope carrying only a message.
    ///
    /// Used by soft-failure endpoints that report errors as values
    /// instead of raising them.
    #[must_use]
    pub const fn failure(message: String) -> Self {
        Self {
            success: false,
            message,
            data: None,
        }
    }
}

/// A page of results plus its pagination cursor data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paged<T> {
    /// The items on this page.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Position of this page within the full result set.
    pub pagination: Pagination,
}

/// Pagination block nested in list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total items across all pages.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u32,
}
