//! Cycle controller - single-flight runner for simulation mutations
//!
//! Running a cycle advances the remote simulation and is not idempotent, so
//! at most one cycle or phase request is in flight per session. The gate is
//! a two-state machine:
//!
//! ```text
//! Idle ──acquire──→ Running ──(success | failure | cancellation)──→ Idle
//! ```
//!
//! The way back to `Idle` is the drop of `CycleGuard`, so it happens on
//! every exit path, including when the running future is dropped mid-request.
//! The gate covers the mutation only: it is released before the follow-up
//! status and market reads, so a stalled read never locks out the next run.
//! It does not hold off poll ticks either.

use std::sync::Arc;

use agenthub_client::SimulationBackend;
use agenthub_types::{CyclePhase, CycleReport, Locale, PhaseReport};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::cache::{RefreshOutcome, RemoteStateCache};
use crate::log::LogBuffer;
use crate::messages;

/// Whether a mutation is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleState {
    #[default]
    Idle,
    Running,
}

/// Result of a cycle or phase request, as seen by the trigger
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome<T> {
    /// The backend accepted the mutation
    Completed(T),
    /// The request failed; the reason was written to the run log
    Failed(String),
    /// Another mutation was already in flight; nothing was sent
    Busy,
}

impl<T> RunOutcome<T> {
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RunOutcome<U> {
        match self {
            Self::Completed(value) => RunOutcome::Completed(f(value)),
            Self::Failed(reason) => RunOutcome::Failed(reason),
            Self::Busy => RunOutcome::Busy,
        }
    }
}

#[derive(Debug, Default)]
struct CycleGate {
    state: Mutex<CycleState>,
}

impl CycleGate {
    fn try_acquire(&self) -> Option<CycleGuard<'_>> {
        let mut state = self.state.lock();
        match *state {
            CycleState::Running => None,
            CycleState::Idle => {
                *state = CycleState::Running;
                Some(CycleGuard { gate: self })
            }
        }
    }

    fn state(&self) -> CycleState {
        *self.state.lock()
    }
}

/// Holds the gate in `Running`; dropping it returns the gate to `Idle`
struct CycleGuard<'a> {
    gate: &'a CycleGate,
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        *self.gate.state.lock() = CycleState::Idle;
    }
}

pub struct CycleController {
    backend: Arc<dyn SimulationBackend>,
    cache: Arc<RemoteStateCache>,
    log: Arc<LogBuffer>,
    locale: Locale,
    gate: CycleGate,
}

impl CycleController {
    pub fn new(
        backend: Arc<dyn SimulationBackend>,
        cache: Arc<RemoteStateCache>,
        log: Arc<LogBuffer>,
        locale: Locale,
    ) -> Self {
        Self {
            backend,
            cache,
            log,
            locale,
            gate: CycleGate::default(),
        }
    }

    pub fn state(&self) -> CycleState {
        self.gate.state()
    }

    pub fn is_busy(&self) -> bool {
        self.state() == CycleState::Running
    }

    /// Run one full simulation cycle.
    ///
    /// Logs the start, issues `POST /api/cycle/run`, then logs either the
    /// per-phase summary (and pulls fresh status and markets) or the failure.
    /// Returns [`RunOutcome::Busy`] without touching the backend or the log
    /// if a mutation is already in flight.
    pub async fn run_cycle(&self) -> RunOutcome<CycleReport> {
        let Some(guard) = self.gate.try_acquire() else {
            debug!("cycle already in flight, ignoring trigger");
            return RunOutcome::Busy;
        };

        self.log.append(messages::cycle_starting(self.locale));
        info!("running simulation cycle");

        match self.backend.run_cycle().await {
            Ok(report) => {
                info!(
                    cycle = report.cycle,
                    discovery = report.summary.discovery_count,
                    listing = report.summary.listing_count,
                    audit = report.summary.audit_count,
                    "cycle completed"
                );
                self.log.append(messages::cycle_completed(self.locale, &report));
                drop(guard);
                self.refresh_after_mutation().await;
                RunOutcome::Completed(report)
            }
            Err(err) => {
                warn!(error = %err, "cycle run failed");
                let reason = err.to_string();
                self.log.append(messages::cycle_failed(self.locale, &reason));
                RunOutcome::Failed(reason)
            }
        }
    }

    /// Run a single pipeline phase under the same gate and log protocol
    pub async fn run_phase(&self, phase: CyclePhase) -> RunOutcome<PhaseReport> {
        let Some(guard) = self.gate.try_acquire() else {
            debug!(%phase, "mutation already in flight, ignoring phase trigger");
            return RunOutcome::Busy;
        };

        self.log.append(messages::phase_starting(self.locale, phase));
        info!(%phase, "running simulation phase");

        match self.backend.run_phase(phase).await {
            Ok(report) => {
                info!(%phase, results = report.results.len(), "phase completed");
                self.log
                    .append(messages::phase_completed(self.locale, phase, report.results.len()));
                drop(guard);
                self.refresh_after_mutation().await;
                RunOutcome::Completed(report)
            }
            Err(err) => {
                warn!(%phase, error = %err, "phase run failed");
                let reason = err.to_string();
                self.log.append(messages::phase_failed(self.locale, phase, &reason));
                RunOutcome::Failed(reason)
            }
        }
    }

    /// Pull post-mutation state. Failures here are written to the run log,
    /// unlike poll-tick failures which only reach diagnostics.
    async fn refresh_after_mutation(&self) {
        let (status, markets) =
            tokio::join!(self.cache.refresh_status(), self.cache.refresh_markets());

        if let RefreshOutcome::Failed(reason) = status {
            self.log.append(messages::status_refresh_failed(self.locale, &reason));
        }
        if let RefreshOutcome::Failed(reason) = markets {
            self.log.append(messages::markets_refresh_failed(self.locale, &reason));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        api_error, cycle_report, decode_error, sample_market, sample_status, ScriptedBackend,
    };

    struct Fixture {
        backend: Arc<ScriptedBackend>,
        cache: Arc<RemoteStateCache>,
        log: Arc<LogBuffer>,
        controller: Arc<CycleController>,
    }

    fn fixture(backend: ScriptedBackend) -> Fixture {
        let backend = Arc::new(backend);
        let cache = Arc::new(RemoteStateCache::new(backend.clone()));
        let log = Arc::new(LogBuffer::default());
        let controller = Arc::new(CycleController::new(
            backend.clone(),
            cache.clone(),
            log.clone(),
            Locale::En,
        ));
        Fixture { backend, cache, log, controller }
    }

    fn messages_oldest_first(log: &LogBuffer) -> Vec<String> {
        log.entries().iter().rev().map(|e| e.message().to_string()).collect()
    }

    #[tokio::test]
    async fn test_successful_cycle_logs_summary_and_refreshes() {
        let f = fixture(ScriptedBackend::new());
        f.backend.push_cycle(Ok(cycle_report(7, 3, 1, 2)));
        f.backend.push_status(Ok(sample_status(7)));
        f.backend.push_markets(Ok(vec![sample_market("mkt_1")]));

        let outcome = f.controller.run_cycle().await;
        assert!(matches!(outcome, RunOutcome::Completed(ref r) if r.cycle == 7));

        let lines = messages_oldest_first(&f.log);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "🚀 Starting full cycle...");
        for needle in ["7", "3", "1", "2"] {
            assert!(lines[1].contains(needle), "summary missing {}: {}", needle, lines[1]);
        }

        assert_eq!(f.backend.status_calls(), 1);
        assert_eq!(f.backend.market_calls(), 1);
        assert_eq!(f.cache.status().unwrap().cycle_count, 7);
        assert_eq!(f.cache.markets().len(), 1);
        assert_eq!(f.controller.state(), CycleState::Idle);
    }

    #[tokio::test]
    async fn test_failed_cycle_releases_and_logs() {
        let f = fixture(ScriptedBackend::new());
        f.backend.push_cycle(Err(api_error("orchestrator crashed")));

        let outcome = f.controller.run_cycle().await;
        assert!(matches!(outcome, RunOutcome::Failed(ref reason) if reason.contains("orchestrator crashed")));
        assert!(!f.controller.is_busy());

        let lines = messages_oldest_first(&f.log);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("❌"));
        assert!(lines[1].contains("orchestrator crashed"));

        // No follow-up reads after a failed mutation
        assert_eq!(f.backend.status_calls(), 0);
        assert_eq!(f.backend.market_calls(), 0);
        assert!(f.cache.status().is_none());
    }

    #[tokio::test]
    async fn test_malformed_cycle_response_is_a_failure() {
        let f = fixture(ScriptedBackend::new());
        f.backend.push_cycle(Err(decode_error()));

        assert!(matches!(f.controller.run_cycle().await, RunOutcome::Failed(_)));
        assert_eq!(f.controller.state(), CycleState::Idle);
        assert!(f.log.entries()[0].message().starts_with("❌ Cycle failed: Malformed response"));
    }

    #[tokio::test]
    async fn test_second_trigger_while_running_sends_nothing() {
        let f = fixture(ScriptedBackend::new().holding());
        f.backend.push_cycle(Ok(cycle_report(1, 0, 0, 0)));
        f.backend.push_cycle(Ok(cycle_report(2, 0, 0, 0)));
        for cycle in 1..=2 {
            f.backend.push_status(Ok(sample_status(cycle)));
            f.backend.push_markets(Ok(Vec::new()));
        }
        let hold = f.backend.hold();

        let first = tokio::spawn({
            let controller = f.controller.clone();
            async move { controller.run_cycle().await }
        });
        hold.entered.notified().await;
        assert_eq!(f.controller.state(), CycleState::Running);

        assert!(f.controller.run_cycle().await.is_busy());
        assert!(f.controller.run_phase(CyclePhase::Trading).await.is_busy());
        assert_eq!(f.backend.cycle_calls(), 1);
        assert_eq!(f.backend.phase_calls(), 0);
        assert_eq!(f.log.len(), 1);

        hold.release.notify_one();
        assert!(matches!(first.await.unwrap(), RunOutcome::Completed(ref r) if r.cycle == 1));
        assert_eq!(f.controller.state(), CycleState::Idle);

        hold.release.notify_one();
        assert!(matches!(f.controller.run_cycle().await, RunOutcome::Completed(ref r) if r.cycle == 2));
        assert_eq!(f.backend.cycle_calls(), 2);
    }

    #[tokio::test]
    async fn test_hung_follow_up_read_does_not_block_next_cycle() {
        let f = fixture(ScriptedBackend::new().stalling_markets());
        f.backend.push_cycle(Ok(cycle_report(1, 0, 0, 0)));
        f.backend.push_cycle(Ok(cycle_report(2, 0, 0, 0)));
        f.backend.push_status(Ok(sample_status(1)));

        let first = tokio::spawn({
            let controller = f.controller.clone();
            async move { controller.run_cycle().await }
        });
        while f.backend.market_calls() == 0 {
            tokio::task::yield_now().await;
        }

        // The market read never answers, yet the mutation is settled
        assert!(!f.controller.is_busy());
        assert!(messages_oldest_first(&f.log).iter().any(|l| l.starts_with("✅ Cycle 1 complete")));

        let second = tokio::spawn({
            let controller = f.controller.clone();
            async move { controller.run_cycle().await }
        });
        while f.backend.market_calls() < 2 {
            tokio::task::yield_now().await;
        }
        assert_eq!(f.backend.cycle_calls(), 2);
        assert!(messages_oldest_first(&f.log).iter().any(|l| l.starts_with("✅ Cycle 2 complete")));
        assert!(!f.controller.is_busy());

        first.abort();
        second.abort();
    }

    #[tokio::test]
    async fn test_cancelled_run_still_releases_gate() {
        let f = fixture(ScriptedBackend::new().holding());
        let hold = f.backend.hold();

        let running = tokio::spawn({
            let controller = f.controller.clone();
            async move { controller.run_cycle().await }
        });
        hold.entered.notified().await;
        assert!(f.controller.is_busy());

        running.abort();
        assert!(running.await.unwrap_err().is_cancelled());
        assert_eq!(f.controller.state(), CycleState::Idle);
    }

    #[tokio::test]
    async fn test_follow_up_refresh_failures_are_logged() {
        let f = fixture(ScriptedBackend::new());
        f.backend.push_status(Ok(sample_status(1)));
        f.cache.refresh_status().await;

        f.backend.push_cycle(Ok(cycle_report(2, 1, 1, 1)));
        f.backend.push_status(Err(api_error("status down")));
        f.backend.push_markets(Err(api_error("markets down")));

        assert!(matches!(f.controller.run_cycle().await, RunOutcome::Completed(_)));

        let lines = messages_oldest_first(&f.log);
        assert_eq!(lines.len(), 4);
        assert!(lines[2..].iter().any(|l| l.contains("Status refresh failed") && l.contains("status down")));
        assert!(lines[2..].iter().any(|l| l.contains("Market refresh failed") && l.contains("markets down")));
        // Stale snapshot survives
        assert_eq!(f.cache.status().unwrap().cycle_count, 1);
    }

    #[tokio::test]
    async fn test_phase_run_logs_and_refreshes() {
        let f = fixture(ScriptedBackend::new());
        f.backend.push_phase(Ok(PhaseReport {
            success: true,
            results: vec![serde_json::json!({"action": "create_market"})],
        }));
        f.backend.push_status(Ok(sample_status(0)));
        f.backend.push_markets(Ok(vec![sample_market("mkt_9")]));

        let outcome = f.controller.run_phase(CyclePhase::Listing).await;
        assert!(matches!(outcome, RunOutcome::Completed(ref r) if r.results.len() == 1));
        assert_eq!(
            messages_oldest_first(&f.log),
            vec!["🚀 Starting Listing phase...", "✅ Listing phase complete, results: 1"]
        );
        assert_eq!(f.cache.markets()[0].id, "mkt_9");
    }

    #[tokio::test]
    async fn test_failed_phase_logs_reason() {
        let f = fixture(ScriptedBackend::new());
        f.backend.push_phase(Err(api_error("no listing agents")));

        assert!(matches!(f.controller.run_phase(CyclePhase::Listing).await, RunOutcome::Failed(_)));
        assert!(f.log.entries()[0].message().contains("no listing agents"));
        assert!(!f.controller.is_busy());
    }
}
