//! Status poller - periodic refresh independent of user action
//!
//! The poller owns one repeating timer. Each tick fires a status refresh as
//! its own task and does not wait for it, so a slow request never delays the
//! next tick and overlapping refreshes settle in completion order. Markets
//! are not polled.
//!
//! Cancelling the poller stops the timer. Refreshes already in flight are
//! left to finish on their own.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::RemoteStateCache;

/// Period between status refreshes
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct Poller {
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl Poller {
    /// Start polling. The first tick fires one `period` from now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(cache: Arc<RemoteStateCache>, period: Duration) -> Self {
        let period = period.max(MIN_POLL_INTERVAL);

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                debug!("poll tick");
                let cache = cache.clone();
                tokio::spawn(async move {
                    cache.refresh_status().await;
                });
            }
        });

        info!(period_ms = period.as_millis() as u64, "status poller started");
        Self {
            period,
            handle: Some(handle),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the timer. Calling this more than once has no further effect.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!("status poller stopped");
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.cancel();
    }
}
