//! Generic resource slice.
//!
//! One slice caches the last known server state for one resource as an
//! immutable snapshot behind an `Arc`, replaced atomically on every
//! transition. Exactly three events mutate a slice - request started,
//! request succeeded, request failed - plus an explicit clear tied to
//! logout. Slices never perform I/O; sequencing a service call around the
//! transitions is [`dispatch`]'s job.

use std::future::Future;
use std::sync::{Arc, RwLock, RwLockWriteGuard};

/// Snapshot of one resource's cached state.
#[derive(Debug, Clone)]
pub struct ResourceState<T> {
    /// Last successful payload. May be stale while `loading` is true and
    /// survives failures; there is no automatic invalidation.
    pub data: Option<T>,
    /// Whether a request is currently in flight.
    pub loading: bool,
    /// Message from the most recent failure, cleared by the next request.
    pub error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// Atomically-replaced snapshot holder for one resource.
#[derive(Debug)]
pub struct Slice<T> {
    state: RwLock<Arc<ResourceState<T>>>,
}

impl<T> Default for Slice<T> {
    fn default() -> Self {
        Self {
            state: RwLock::new(Arc::new(ResourceState::default())),
        }
    }
}

impl<T: Clone> Slice<T> {
    /// Create an empty slice.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot. Cheap; consumers hold a read-only view and
    /// never mutate through it.
    #[must_use]
    pub fn snapshot(&self) -> Arc<ResourceState<T>> {
        Arc::clone(
            &self
                .state
                .read()
                .unwrap_or_else(std::sync::PoisonError::into_inner),
        )
    }

    /// Request started: `loading` set, `error` cleared, `data` untouched.
    pub fn request(&self) {
        let mut guard = self.write();
        *guard = Arc::new(ResourceState {
            data: guard.data.clone(),
            loading: true,
            error: None,
        });
    }

    /// Request succeeded: `data` replaced, flags cleared.
    pub fn succeed(&self, data: T) {
        let mut guard = self.write();
        *guard = Arc::new(ResourceState {
            data: Some(data),
            loading: false,
            error: None,
        });
    }

    /// Request failed: `error` set, `data` unchanged. Idempotent under
    /// repetition.
    pub fn fail(&self, message: impl Into<String>) {
        let mut guard = self.write();
        *guard = Arc::new(ResourceState {
            data: guard.data.clone(),
            loading: false,
            error: Some(message.into()),
        });
    }

    /// Reset to the initial empty state.
    pub fn clear(&self) {
        *self.write() = Arc::new(ResourceState::default());
    }

    fn write(&self) -> RwLockWriteGuard<'_, Arc<ResourceState<T>>> {
        self.state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Sequence one service call through a slice's transitions.
///
/// Dispatches *request*, awaits the future, then dispatches *success* or
/// *failure*, and hands the service result back to the caller either way.
///
/// No ordering is guaranteed across concurrent dispatches against the
/// same slice: whichever completion lands last wins, regardless of start
/// order. Callers needing ordering must await sequentially. There is no
/// cancellation; a dispatch whose consumer went away still completes and
/// still lands in the slice.
///
/// # Errors
///
/// Returns the service error after recording its message in the slice.
pub async fn dispatch<T, E, F>(slice: &Slice<T>, call: F) -> Result<T, E>
where
    T: Clone,
    E: std::fmt::Display,
    F: Future<Output = Result<T, E>>,
{
    slice.request();
    match call.await {
        Ok(value) => {
            slice.succeed(value.clone());
            Ok(value)
        }
        Err(err) => {
            slice.fail(err.to_string());
            Err(err)
        }
    }
}
