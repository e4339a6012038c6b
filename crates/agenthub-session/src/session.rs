//! Session - explicit owner of all client state for one monitor run
//!
//! Construction starts from an empty cache and an empty log, fires the
//! initial status and market fetch, and starts the poller. Teardown cancels
//! the poller; nothing is persisted.

use std::sync::Arc;
use std::time::Duration;

use agenthub_client::SimulationBackend;
use agenthub_types::{CyclePhase, CycleReport, Locale, Market, PhaseReport, SystemStatus};
use tokio::task::JoinHandle;
use tracing::info;

use crate::cache::RemoteStateCache;
use crate::cycle::{CycleController, CycleState, RunOutcome};
use crate::log::{LogBuffer, LogEntry, DEFAULT_LOG_CAPACITY};
use crate::poller::{Poller, DEFAULT_POLL_INTERVAL};

/// Tunables for a session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub poll_interval: Duration,
    pub log_capacity: usize,
    pub locale: Locale,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            log_capacity: DEFAULT_LOG_CAPACITY,
            locale: Locale::default(),
        }
    }
}

/// Read-only snapshot handed to renderers
#[derive(Debug, Clone)]
pub struct SessionView {
    pub status: Option<Arc<SystemStatus>>,
    pub markets: Arc<Vec<Market>>,
    /// Run log, newest first
    pub log: Vec<LogEntry>,
    pub cycle_state: CycleState,
    pub polling: bool,
    pub locale: Locale,
}

impl SessionView {
    pub fn is_busy(&self) -> bool {
        self.cycle_state == CycleState::Running
    }

    pub fn cycle_count(&self) -> u64 {
        self.status.as_ref().map(|s| s.cycle_count).unwrap_or(0)
    }

    pub fn market_count(&self) -> u64 {
        self.status.as_ref().map(|s| s.market_count).unwrap_or(0)
    }
}

pub struct Session {
    cache: Arc<RemoteStateCache>,
    log: Arc<LogBuffer>,
    cycles: Arc<CycleController>,
    poller: Poller,
    locale: Locale,
}

impl Session {
    /// Begin a session against `backend`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(backend: Arc<dyn SimulationBackend>, config: SessionConfig) -> Self {
        let cache = Arc::new(RemoteStateCache::new(backend.clone()));
        let log = Arc::new(LogBuffer::new(config.log_capacity));
        let cycles = Arc::new(CycleController::new(
            backend,
            cache.clone(),
            log.clone(),
            config.locale,
        ));

        tokio::spawn({
            let cache = cache.clone();
            async move {
                tokio::join!(cache.refresh_status(), cache.refresh_markets());
            }
        });
        let poller = Poller::spawn(cache.clone(), config.poll_interval);

        info!(
            log_capacity = log.capacity(),
            locale = %config.locale,
            "session started"
        );

        Self {
            cache,
            log,
            cycles,
            poller,
            locale: config.locale,
        }
    }

    pub fn cache(&self) -> &Arc<RemoteStateCache> {
        &self.cache
    }

    pub fn log(&self) -> &Arc<LogBuffer> {
        &self.log
    }

    pub fn cycles(&self) -> &Arc<CycleController> {
        &self.cycles
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            status: self.cache.status(),
            markets: self.cache.markets(),
            log: self.log.entries(),
            cycle_state: self.cycles.state(),
            polling: self.poller.is_active(),
            locale: self.locale,
        }
    }

    /// Trigger a cycle without waiting for it. A trigger while busy is a no-op.
    pub fn spawn_cycle(&self) -> JoinHandle<RunOutcome<CycleReport>> {
        let cycles = self.cycles.clone();
        tokio::spawn(async move { cycles.run_cycle().await })
    }

    pub fn spawn_phase(&self, phase: CyclePhase) -> JoinHandle<RunOutcome<PhaseReport>> {
        let cycles = self.cycles.clone();
        tokio::spawn(async move { cycles.run_phase(phase).await })
    }

    /// Manual market refresh, outside the poll schedule
    pub fn spawn_market_refresh(&self) {
        let cache = self.cache.clone();
        tokio::spawn(async move {
            cache.refresh_markets().await;
        });
    }

    /// End the session: stop polling. In-flight requests are not cancelled.
    pub fn shutdown(mut self) {
        self.poller.cancel();
        info!("session ended");
    }
}
