//! Cookie jar - the sole read/write/delete path for the session token and
//! small derived identifiers.
//!
//! The jar mirrors browser cookie semantics: entries may carry an expiry in
//! days (`set` without one yields a session cookie), expired entries read as
//! absent, and deletion is a `set` with a negative expiry. A *disabled* jar
//! silently no-ops every operation so non-interactive execution contexts
//! (scripted runs, server-side rendering) remain safe without error
//! handling at every call site.
//!
//! The CLI persists the jar to disk as JSON so a login survives process
//! restarts; in-memory use needs no I/O at all.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cookie name holding the bearer JWT.
pub const TOKEN: &str = "token";

/// Cookie name caching a resolved dealer identifier.
pub const DEALER_ID: &str = "dealer_id";

/// Errors from loading or saving a persistent jar.
#[derive(Debug, Error)]
pub enum JarError {
    #[error("cookie file I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cookie file is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Options for [`CookieJar::set`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CookieOptions {
    /// Lifetime in days. `None` produces a session cookie; a negative
    /// value deletes the entry.
    pub days: Option<i64>,
    /// Only meaningful over HTTPS; carried for fidelity with the browser
    /// jar, not enforced client-side.
    pub secure: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CookieEntry {
    value: String,
    /// Absent for session cookies.
    expires_at: Option<DateTime<Utc>>,
    secure: bool,
}

impl CookieEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct JarState {
    entries: HashMap<String, CookieEntry>,
}

/// Shared handle to a [`CookieJar`].
pub type SharedJar = Arc<CookieJar>;

/// In-memory cookie jar with optional JSON persistence.
#[derive(Debug, Default)]
pub struct CookieJar {
    state: RwLock<JarState>,
    disabled: bool,
}

impl CookieJar {
    /// Create an empty jar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty jar behind a shared handle.
    #[must_use]
    pub fn shared() -> SharedJar {
        Arc::new(Self::new())
    }

    /// Create a disabled jar: `get` returns `None`, writes do nothing.
    #[must_use]
    pub fn disabled() -> SharedJar {
        Arc::new(Self {
            state: RwLock::new(JarState::default()),
            disabled: true,
        })
    }

    /// Whether this jar ignores all operations.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Read a cookie. Expired entries read as absent and are purged.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        if self.disabled {
            return None;
        }
        let now = Utc::now();
        let expired = {
            let state = self.read();
            match state.entries.get(name) {
                None => return None,
                Some(entry) if entry.is_expired(now) => true,
                Some(entry) => return Some(entry.value.clone()),
            }
        };
        if expired {
            self.write().entries.remove(name);
        }
        None
    }

    /// Write a cookie. A negative `days` removes the entry, matching the
    /// browser idiom of deleting via a past expiry.
    pub fn set(&self, name: &str, value: &str, options: CookieOptions) {
        if self.disabled {
            return;
        }
        let mut state = self.write();
        match options.days {
            Some(days) if days < 0 => {
                state.entries.remove(name);
            }
            days => {
                let expires_at = days.map(|d| Utc::now() + Duration::days(d));
                state.entries.insert(
                    name.to_string(),
                    CookieEntry {
                        value: value.to_string(),
                        expires_at,
                        secure: options.secure,
                    },
                );
            }
        }
    }

    /// Delete a cookie (implemented as a set with a negative expiry).
    pub fn delete(&self, name: &str) {
        self.set(
            name,
            "",
            CookieOptions {
                days: Some(-1),
                secure: false,
            },
        );
    }

    /// Remove every entry.
    pub fn clear(&self) {
        if self.disabled {
            return;
        }
        self.write().entries.clear();
    }

    /// Load jar contents from a JSON file, replacing current entries.
    /// A missing file leaves the jar empty rather than erroring.
    ///
    /// # Errors
    ///
    /// Returns [`JarError`] when the file exists but cannot be read or
    /// parsed.
    pub fn load(&self, path: &Path) -> Result<(), JarError> {
        if self.disabled || !path.exists() {
            return Ok(());
        }
        let contents = std::fs::read_to_string(path)?;
        let loaded: JarState = serde_json::from_str(&contents)?;
        *self.write() = loaded;
        Ok(())
    }

    /// Persist jar contents to a JSON file, dropping expired entries.
    ///
    /// # Errors
    ///
    /// Returns [`JarError`] on serialization or write failure.
    pub fn save(&self, path: &Path) -> Result<(), JarError> {
        if self.disabled {
            return Ok(());
        }
        let now = Utc::now();
        let json = {
            let mut state = self.write();
            state.entries.retain(|_, entry| !entry.is_expired(now));
            serde_json::to_string_pretty(&*state)?
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, JarState> {
        self.state.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, JarState> {
        self.state.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
