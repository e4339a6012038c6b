//! System status snapshot reported by `GET /api/status`

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{Agent, AgentType};

/// Point-in-time view of the remote simulation.
///
/// A snapshot is immutable once decoded. Newer snapshots replace older ones
/// wholesale; nothing is merged between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    /// Whether the remote simulation loop is active
    pub running: bool,
    /// Number of completed cycles
    pub cycle_count: u64,
    pub agent_counts: BTreeMap<AgentType, u64>,
    pub market_count: u64,
    pub message_queue_size: u64,
    /// Agents grouped by role, iterated in pipeline order
    #[serde(rename = "agents")]
    pub agents_by_type: BTreeMap<AgentType, Vec<Agent>>,
}

impl SystemStatus {
    /// Reported agent count for a role, zero when the role is absent
    pub fn agent_count(&self, agent_type: &AgentType) -> u64 {
        self.agent_counts.get(agent_type).copied().unwrap_or(0)
    }

    pub fn total_agents(&self) -> u64 {
        self.agent_counts.values().sum()
    }

    /// Every agent in the snapshot, grouped by role in pipeline order
    pub fn agents(&self) -> impl Iterator<Item = (&AgentType, &Agent)> {
        self.agents_by_type
            .iter()
            .flat_map(|(agent_type, agents)| agents.iter().map(move |agent| (agent_type, agent)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "running": true,
            "cycle_count": 3,
            "agent_counts": {"trading": 1, "discovery": 2, "oracle": 1},
            "market_count": 5,
            "message_queue_size": 11,
            "agents": {
                "trading": [{
                    "name": "Trader",
                    "type": "trading",
                    "description": "",
                    "status": "running",
                    "performance": {"total_actions": 1, "successful_actions": 1, "failed_actions": 0, "total_profit": -3.0},
                    "recent_actions": []
                }],
                "discovery": [{
                    "name": "Scout",
                    "type": "discovery",
                    "description": "",
                    "status": "idle",
                    "performance": {"total_actions": 0, "successful_actions": 0, "failed_actions": 0, "total_profit": 0.0},
                    "recent_actions": []
                }]
            }
        })
    }

    #[test]
    fn test_status_decodes_and_counts() {
        let status: SystemStatus = serde_json::from_value(sample_json()).unwrap();
        assert!(status.running);
        assert_eq!(status.cycle_count, 3);
        assert_eq!(status.agent_count(&AgentType::Discovery), 2);
        assert_eq!(status.agent_count(&AgentType::Governance), 0);
        assert_eq!(status.agent_count(&AgentType::from("oracle")), 1);
        assert_eq!(status.total_agents(), 4);
    }

    #[test]
    fn test_agents_iterate_in_pipeline_order() {
        let status: SystemStatus = serde_json::from_value(sample_json()).unwrap();
        let names: Vec<&str> = status.agents().map(|(_, agent)| agent.name.as_str()).collect();
        assert_eq!(names, vec!["Scout", "Trader"]);
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let mut json = sample_json();
        json.as_object_mut().unwrap().remove("cycle_count");
        assert!(serde_json::from_value::<SystemStatus>(json).is_err());
    }
}
