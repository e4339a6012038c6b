//! The seam between the session model and the remote simulation

use agenthub_types::{CycleReport, CyclePhase, Market, PhaseReport, SystemStatus};
use async_trait::async_trait;

use crate::ClientResult;

/// Remote operations the monitor depends on.
///
/// Reads are idempotent. `run_cycle` and `run_phase` advance the remote
/// simulation and must not be retried blindly.
#[async_trait]
pub trait SimulationBackend: Send + Sync {
    /// `GET /api/status`
    async fn fetch_status(&self) -> ClientResult<SystemStatus>;

    /// `GET /api/markets`
    async fn fetch_markets(&self) -> ClientResult<Vec<Market>>;

    /// `POST /api/cycle/run`
    async fn run_cycle(&self) -> ClientResult<CycleReport>;

    /// `POST /api/cycle/{phase}`
    async fn run_phase(&self, phase: CyclePhase) -> ClientResult<PhaseReport>;
}
