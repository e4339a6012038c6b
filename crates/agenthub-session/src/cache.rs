//! Remote state cache - last-known status and market list
//!
//! Every successful fetch replaces the cached value wholesale. A failed
//! fetch leaves the previous snapshot in place and is only reported to
//! diagnostics; callers get a [`RefreshOutcome`], never an error.
//!
//! Concurrent refreshes are not ordered: whichever response arrives last
//! wins, regardless of which request was sent first.

use std::sync::Arc;

use agenthub_client::SimulationBackend;
use agenthub_types::{Market, SystemStatus};
use parking_lot::RwLock;
use tracing::{debug, warn};

/// What a refresh did to the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The cached value was replaced
    Updated,
    /// The fetch failed and the cached value was kept
    Failed(String),
}

impl RefreshOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated)
    }
}

pub struct RemoteStateCache {
    backend: Arc<dyn SimulationBackend>,
    status: RwLock<Option<Arc<SystemStatus>>>,
    markets: RwLock<Arc<Vec<Market>>>,
}

impl RemoteStateCache {
    /// Create an empty cache: no status, no markets
    pub fn new(backend: Arc<dyn SimulationBackend>) -> Self {
        Self {
            backend,
            status: RwLock::new(None),
            markets: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Latest status, `None` until the first successful fetch
    pub fn status(&self) -> Option<Arc<SystemStatus>> {
        self.status.read().clone()
    }

    pub fn markets(&self) -> Arc<Vec<Market>> {
        self.markets.read().clone()
    }

    pub async fn refresh_status(&self) -> RefreshOutcome {
        match self.backend.fetch_status().await {
            Ok(status) => {
                debug!(cycle = status.cycle_count, running = status.running, "status refreshed");
                *self.status.write() = Some(Arc::new(status));
                RefreshOutcome::Updated
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch status");
                RefreshOutcome::Failed(err.to_string())
            }
        }
    }

    pub async fn refresh_markets(&self) -> RefreshOutcome {
        match self.backend.fetch_markets().await {
            Ok(markets) => {
                debug!(count = markets.len(), "markets refreshed");
                *self.markets.write() = Arc::new(markets);
                RefreshOutcome::Updated
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch markets");
                RefreshOutcome::Failed(err.to_string())
            }
        }
    }
}
