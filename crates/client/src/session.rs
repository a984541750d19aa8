//! Session expiry monitor.
//!
//! Logs the user out the instant the token's `exp` claim elapses rather
//! than waiting for the next rejected API call.
//!
//! # State machine
//!
//! **Idle → Scheduled → (Fired | Cancelled)**
//!
//! On activation the monitor reads the token from the cookie jar. No
//! token, an undecodable token, or an already-elapsed expiry fire the
//! logout hook immediately, without scheduling. Otherwise a single timer
//! is armed for the remaining lifetime. When the timer elapses the *full*
//! activation logic re-runs - it re-reads the jar, so a token renewed in
//! the meantime silently re-arms a new, later deadline instead of logging
//! the user out. Teardown aborts the pending timer with no side effect.
//!
//! The monitor holds no decoded state across cycles; it re-derives
//! everything from the jar each time. One timer exists per monitor
//! instance, and re-activation always cancels the previous timer first so
//! duplicate firings cannot occur.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cookies::{self, SharedJar};
use crate::token;

/// Hook invoked when the session is found to be over.
///
/// Wired by the embedding application to clear session state (jar, store
/// slices) and route to login.
pub type LogoutHook = Arc<dyn Fn() + Send + Sync>;

/// Millisecond epoch clock, injectable so timer tests can run on tokio's
/// paused clock.
type ClockFn = Arc<dyn Fn() -> i64 + Send + Sync>;

/// What one activation cycle decided to do.
enum Decision {
    /// The session is already over.
    Fire,
    /// The session lapses after this long.
    Schedule(Duration),
}

/// Watches the token cookie and fires a logout hook at expiry.
#[derive(Clone)]
pub struct SessionMonitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    jar: SharedJar,
    on_logout: LogoutHook,
    now_ms: ClockFn,
    /// The single pending timer, if any. Re-arming replaces it; teardown
    /// aborts it.
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl SessionMonitor {
    /// Create an idle monitor. Nothing happens until [`activate`].
    ///
    /// [`activate`]: Self::activate
    #[must_use]
    pub fn new(jar: SharedJar, on_logout: LogoutHook) -> Self {
        Self::build(jar, on_logout, Arc::new(|| Utc::now().timestamp_millis()))
    }

    fn build(jar: SharedJar, on_logout: LogoutHook, now_ms: ClockFn) -> Self {
        Self {
            inner: Arc::new(MonitorInner {
                jar,
                on_logout,
                now_ms,
                timer: Mutex::new(None),
            }),
        }
    }

    /// Run one activation cycle: cancel any pending timer, then either
    /// fire immediately or schedule the deferred logout.
    ///
    /// Must be called from within a tokio runtime.
    pub fn activate(&self) {
        self.cancel_timer();
        self.arm();
    }

    /// Tear the monitor down: the pending timer (if any) is cancelled and
    /// no side effect occurs.
    pub fn shutdown(&self) {
        self.cancel_timer();
        debug!("session monitor shut down");
    }

    /// Whether a deferred logout is currently scheduled.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.lock_timer().as_ref().is_some_and(|h| !h.is_finished())
    }

    fn arm(&self) {
        match self.evaluate() {
            Decision::Fire => {
                debug!("session over, dispatching logout");
                (self.inner.on_logout)();
            }
            Decision::Schedule(remaining) => {
                debug!(?remaining, "scheduling deferred logout");
                let monitor = self.clone();
                let handle = tokio::spawn(async move {
                    tokio::time::sleep(remaining).await;
                    // Re-run the full activation logic instead of logging
                    // out unconditionally: a renewed token re-arms a new,
                    // later deadline.
                    monitor.arm();
                });
                *self.lock_timer() = Some(handle);
            }
        }
    }

    fn evaluate(&self) -> Decision {
        let Some(raw) = self.inner.jar.get(cookies::TOKEN) else {
            return Decision::Fire;
        };
        let claims = match token::decode(&raw) {
            Ok(claims) => claims,
            Err(err) => {
                warn!(error = %err, "session token undecodable, treating as expired");
                return Decision::Fire;
            }
        };
        let remaining_ms = claims
            .exp
            .saturating_mul(1000)
            .saturating_sub((self.inner.now_ms)());
        match u64::try_from(remaining_ms) {
            Ok(ms) if ms > 0 => Decision::Schedule(Duration::from_millis(ms)),
            _ => Decision::Fire,
        }
    }

    fn cancel_timer(&self) {
        if let Some(handle) = self.lock_timer().take() {
            handle.abort();
        }
    }

    fn lock_timer(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.inner
            .timer
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cookies::{CookieJar, CookieOptions};
    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fixed epoch base so tests are independent of the wall clock.
    const EPOCH0_MS: i64 = 1_750_000_000_000;

    /// Clock that starts at `EPOCH0_MS` and follows tokio's (pausable)
    /// time instead of the wall clock.
    fn tokio_clock() -> ClockFn {
        let start = tokio::time::Instant::now();
        Arc::new(move || {
            EPOCH0_MS + i64::try_from(start.elapsed().as_millis()).unwrap_or(i64::MAX)
        })
    }

    /// A token expiring `seconds` after `EPOCH0_MS`.
    fn token_expiring_in(seconds: i64) -> String {
        let payload = serde_json::json!({"id": 1, "exp": EPOCH0_MS / 1000 + seconds});
        let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&payload).unwrap());
        format!("h.{body}.s")
    }

    fn counting_monitor(jar: SharedJar) -> (SessionMonitor, Arc<AtomicUsize>) {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let monitor = SessionMonitor::build(
            jar,
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
            tokio_clock(),
        );
        (monitor, fired)
    }

    #[tokio::test]
    async fn test_missing_token_fires_immediately() {
        let (monitor, fired) = counting_monitor(CookieJar::shared());
        monitor.activate();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!monitor.is_scheduled());
    }

    #[tokio::test]
    async fn test_undecodable_token_fires_immediately() {
        let jar = CookieJar::shared();
        jar.set(cookies::TOKEN, "garbage", CookieOptions::default());
        let (monitor, fired) = counting_monitor(jar);
        monitor.activate();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_token_fires_without_scheduling() {
        let jar = CookieJar::shared();
        jar.set(
            cookies::TOKEN,
            &token_expiring_in(-10),
            CookieOptions::default(),
        );
        let (monitor, fired) = counting_monitor(jar);
        monitor.activate();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!monitor.is_scheduled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_live_token_fires_at_expiry() {
        let jar = CookieJar::shared();
        jar.set(
            cookies::TOKEN,
            &token_expiring_in(2),
            CookieOptions::default(),
        );
        let (monitor, fired) = counting_monitor(jar);
        monitor.activate();
        assert!(monitor.is_scheduled());

        tokio::time::sleep(Duration::from_millis(1900)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_pending_logout() {
        let jar = CookieJar::shared();
        jar.set(
            cookies::TOKEN,
            &token_expiring_in(2),
            CookieOptions::default(),
        );
        let (monitor, fired) = counting_monitor(jar);
        monitor.activate();
        monitor.shutdown();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(!monitor.is_scheduled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_renewed_token_rearms_instead_of_firing() {
        let jar = CookieJar::shared();
        jar.set(
            cookies::TOKEN,
            &token_expiring_in(2),
            CookieOptions::default(),
        );
        let (monitor, fired) = counting_monitor(Arc::clone(&jar));
        monitor.activate();

        // Renew the token before the first deadline.
        tokio::time::sleep(Duration::from_secs(1)).await;
        jar.set(
            cookies::TOKEN,
            &token_expiring_in(8),
            CookieOptions::default(),
        );

        // Past the original deadline: the cycle re-read the jar and
        // re-armed for the renewed expiry.
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reactivation_cancels_previous_timer() {
        let jar = CookieJar::shared();
        jar.set(
            cookies::TOKEN,
            &token_expiring_in(2),
            CookieOptions::default(),
        );
        let (monitor, fired) = counting_monitor(jar);
        monitor.activate();
        monitor.activate();

        tokio::time::sleep(Duration::from_secs(5)).await;
        // One logout despite two activations: the second cancelled the
        // first timer before arming its own.
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
