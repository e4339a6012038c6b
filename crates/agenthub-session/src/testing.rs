//! Scripted in-memory backend for session tests

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use agenthub_client::{ClientError, ClientResult, SimulationBackend};
use agenthub_types::{
    Agent, AgentPerformance, AgentStatus, AgentType, CyclePhase, CycleReport, CycleSummary,
    Market, MarketStatus, PhaseReport, SystemStatus,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

struct Scripted<T> {
    delay: Duration,
    result: ClientResult<T>,
}

/// Parks mutation calls until the test releases them
#[derive(Default)]
pub(crate) struct Hold {
    pub entered: Notify,
    pub release: Notify,
}

/// Backend that answers from per-endpoint queues.
///
/// An empty queue answers with a 503 so unscripted calls show up as
/// failures rather than hangs.
#[derive(Default)]
pub(crate) struct ScriptedBackend {
    statuses: Mutex<VecDeque<Scripted<SystemStatus>>>,
    markets: Mutex<VecDeque<Scripted<Vec<Market>>>>,
    cycles: Mutex<VecDeque<Scripted<CycleReport>>>,
    phases: Mutex<VecDeque<Scripted<PhaseReport>>>,
    status_calls: AtomicUsize,
    market_calls: AtomicUsize,
    cycle_calls: AtomicUsize,
    phase_calls: AtomicUsize,
    hold: Option<Arc<Hold>>,
    stall_markets: bool,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every cycle and phase call wait for `hold().release`
    pub fn holding(mut self) -> Self {
        self.hold = Some(Arc::new(Hold::default()));
        self
    }

    /// Make every market fetch hang forever
    pub fn stalling_markets(mut self) -> Self {
        self.stall_markets = true;
        self
    }

    pub fn hold(&self) -> Arc<Hold> {
        self.hold.clone().expect("backend was not built with holding()")
    }

    pub fn push_status(&self, result: ClientResult<SystemStatus>) {
        self.push_status_after(Duration::ZERO, result);
    }

    pub fn push_status_after(&self, delay: Duration, result: ClientResult<SystemStatus>) {
        self.statuses.lock().push_back(Scripted { delay, result });
    }

    pub fn push_markets(&self, result: ClientResult<Vec<Market>>) {
        self.markets.lock().push_back(Scripted { delay: Duration::ZERO, result });
    }

    pub fn push_cycle(&self, result: ClientResult<CycleReport>) {
        self.cycles.lock().push_back(Scripted { delay: Duration::ZERO, result });
    }

    pub fn push_phase(&self, result: ClientResult<PhaseReport>) {
        self.phases.lock().push_back(Scripted { delay: Duration::ZERO, result });
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn market_calls(&self) -> usize {
        self.market_calls.load(Ordering::SeqCst)
    }

    pub fn cycle_calls(&self) -> usize {
        self.cycle_calls.load(Ordering::SeqCst)
    }

    pub fn phase_calls(&self) -> usize {
        self.phase_calls.load(Ordering::SeqCst)
    }

    async fn wait_for_release(&self) {
        if let Some(hold) = &self.hold {
            hold.entered.notify_one();
            hold.release.notified().await;
        }
    }
}

async fn answer<T>(queue: &Mutex<VecDeque<Scripted<T>>>) -> ClientResult<T> {
    let next = queue.lock().pop_front();
    match next {
        Some(Scripted { delay, result }) => {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            result
        }
        None => Err(ClientError::Api {
            status: 503,
            message: "no scripted response".to_string(),
        }),
    }
}

#[async_trait]
impl SimulationBackend for ScriptedBackend {
    async fn fetch_status(&self) -> ClientResult<SystemStatus> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        answer(&self.statuses).await
    }

    async fn fetch_markets(&self) -> ClientResult<Vec<Market>> {
        self.market_calls.fetch_add(1, Ordering::SeqCst);
        if self.stall_markets {
            std::future::pending::<()>().await;
        }
        answer(&self.markets).await
    }

    async fn run_cycle(&self) -> ClientResult<CycleReport> {
        self.cycle_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_for_release().await;
        answer(&self.cycles).await
    }

    async fn run_phase(&self, _phase: CyclePhase) -> ClientResult<PhaseReport> {
        self.phase_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_for_release().await;
        answer(&self.phases).await
    }
}

pub(crate) fn api_error(message: &str) -> ClientError {
    ClientError::Api {
        status: 500,
        message: message.to_string(),
    }
}

pub(crate) fn decode_error() -> ClientError {
    ClientError::Decode(serde_json::from_str::<serde_json::Value>("not json").unwrap_err())
}

pub(crate) fn sample_status(cycle_count: u64) -> SystemStatus {
    let scout = Agent {
        name: "Scout".to_string(),
        agent_type: AgentType::Discovery,
        description: "finds events".to_string(),
        status: AgentStatus::Idle,
        performance: AgentPerformance {
            total_actions: cycle_count,
            successful_actions: cycle_count,
            failed_actions: 0,
            total_profit: 0.0,
        },
        recent_actions: Vec::new(),
        memory_size: None,
    };

    SystemStatus {
        running: true,
        cycle_count,
        agent_counts: BTreeMap::from([(AgentType::Discovery, 1)]),
        market_count: 0,
        message_queue_size: 0,
        agents_by_type: BTreeMap::from([(AgentType::Discovery, vec![scout])]),
    }
}

pub(crate) fn sample_market(id: &str) -> Market {
    Market {
        id: id.to_string(),
        market_title: format!("Market {}", id),
        description: String::new(),
        category: "tech".to_string(),
        initial_probability: 0.5,
        initial_liquidity: Some(20_000.0),
        trading_fee: 0.02,
        status: MarketStatus::Active,
        outcomes: vec!["Yes".to_string(), "No".to_string()],
        creator: None,
        created_at: None,
    }
}

pub(crate) fn cycle_report(cycle: u64, discovery: u64, listing: u64, audit: u64) -> CycleReport {
    CycleReport {
        cycle,
        summary: CycleSummary {
            discovery_count: discovery,
            listing_count: listing,
            audit_count: audit,
            ..CycleSummary::default()
        },
        success: Some(true),
        timestamp: None,
    }
}
