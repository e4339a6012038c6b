//! Agent types for AgentHub
//!
//! Agents are owned by the remote simulation. The monitor only ever sees
//! them as part of a status snapshot and renders them as reported; no
//! counter is cross-checked on this side.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Functional role of an agent in the simulation pipeline.
///
/// The six known roles are a closed set, but the backend may report roles
/// this client has never heard of. Those land in [`AgentType::Unknown`]
/// with the raw string preserved, so decoding never fails on a new role.
///
/// Variant order is pipeline order, which is also the order snapshots are
/// iterated in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AgentType {
    Discovery,
    Listing,
    Audit,
    MarketMaker,
    Trading,
    Governance,
    /// Any role string outside the known set
    Unknown(String),
}

impl AgentType {
    /// The six known roles, in pipeline order
    pub const KNOWN: [AgentType; 6] = [
        AgentType::Discovery,
        AgentType::Listing,
        AgentType::Audit,
        AgentType::MarketMaker,
        AgentType::Trading,
        AgentType::Governance,
    ];

    /// Wire name of this role
    pub fn as_str(&self) -> &str {
        match self {
            Self::Discovery => "discovery",
            Self::Listing => "listing",
            Self::Audit => "audit",
            Self::MarketMaker => "market_maker",
            Self::Trading => "trading",
            Self::Governance => "governance",
            Self::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<&str> for AgentType {
    fn from(raw: &str) -> Self {
        match raw {
            "discovery" => Self::Discovery,
            "listing" => Self::Listing,
            "audit" => Self::Audit,
            "market_maker" => Self::MarketMaker,
            "trading" => Self::Trading,
            "governance" => Self::Governance,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for AgentType {
    fn from(raw: String) -> Self {
        match Self::from(raw.as_str()) {
            Self::Unknown(_) => Self::Unknown(raw),
            known => known,
        }
    }
}

impl From<AgentType> for String {
    fn from(agent_type: AgentType) -> Self {
        match agent_type {
            AgentType::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run state of a single agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Idle,
    Running,
    Paused,
    Error,
    /// A state this client does not know about
    #[serde(other)]
    Unknown,
}

impl AgentStatus {
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Cumulative action counters for one agent.
///
/// `successful_actions + failed_actions <= total_actions` is expected from
/// the backend but not enforced here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgentPerformance {
    pub total_actions: u64,
    pub successful_actions: u64,
    pub failed_actions: u64,
    pub total_profit: f64,
}

impl AgentPerformance {
    /// Fraction of actions that succeeded, or `None` before the first action
    pub fn success_rate(&self) -> Option<f64> {
        if self.total_actions == 0 {
            None
        } else {
            Some(self.successful_actions as f64 / self.total_actions as f64)
        }
    }
}

/// An agent as reported inside a status snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    #[serde(rename = "type")]
    pub agent_type: AgentType,
    #[serde(default)]
    pub description: String,
    pub status: AgentStatus,
    pub performance: AgentPerformance,
    /// Last few actions, opaque to the client
    #[serde(default)]
    pub recent_actions: Vec<serde_json::Value>,
    /// Number of items in the agent's memory, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_size: Option<u64>,
}
