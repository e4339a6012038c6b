//! Cycle and phase reports returned by the `/api/cycle/*` mutations

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{AgentType, ParseError};

/// Result of `POST /api/cycle/run`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    /// Index of the cycle that just completed
    pub cycle: u64,
    pub summary: CycleSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Per-phase result counts of one full cycle.
///
/// Only the first three counts are guaranteed; later phases are reported
/// by newer backends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleSummary {
    pub discovery_count: u64,
    pub listing_count: u64,
    pub audit_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_maker_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trading_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governance_count: Option<u64>,
}

impl CycleSummary {
    /// Counts for the later phases, present only if the backend sent all three
    pub fn later_phases(&self) -> Option<(u64, u64, u64)> {
        Some((
            self.market_maker_count?,
            self.trading_count?,
            self.governance_count?,
        ))
    }
}

/// One stage of the simulation pipeline, runnable on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CyclePhase {
    Discovery,
    Listing,
    Audit,
    MarketMaker,
    Trading,
    Governance,
}

impl CyclePhase {
    pub const ALL: [CyclePhase; 6] = [
        CyclePhase::Discovery,
        CyclePhase::Listing,
        CyclePhase::Audit,
        CyclePhase::MarketMaker,
        CyclePhase::Trading,
        CyclePhase::Governance,
    ];

    /// Last path segment of the phase endpoint, `/api/cycle/{segment}`
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Discovery => "discovery",
            Self::Listing => "listing",
            Self::Audit => "audit",
            Self::MarketMaker => "market-maker",
            Self::Trading => "trading",
            Self::Governance => "governance",
        }
    }

    /// Role of the agents that run during this phase
    pub fn agent_type(self) -> AgentType {
        match self {
            Self::Discovery => AgentType::Discovery,
            Self::Listing => AgentType::Listing,
            Self::Audit => AgentType::Audit,
            Self::MarketMaker => AgentType::MarketMaker,
            Self::Trading => AgentType::Trading,
            Self::Governance => AgentType::Governance,
        }
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl FromStr for CyclePhase {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "discovery" => Ok(Self::Discovery),
            "listing" => Ok(Self::Listing),
            "audit" => Ok(Self::Audit),
            "market-maker" => Ok(Self::MarketMaker),
            "trading" => Ok(Self::Trading),
            "governance" => Ok(Self::Governance),
            _ => Err(ParseError::UnknownPhase(s.to_string())),
        }
    }
}

/// Result of `POST /api/cycle/{phase}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseReport {
    #[serde(default)]
    pub success: bool,
    /// Per-agent results, opaque to the client
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}
