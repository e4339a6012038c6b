//! Prediction market types
//!
//! Markets are created remotely by listing agents. The monitor receives
//! the whole list on every fetch and never edits a market in place.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketStatus {
    Active,
    Pending,
    /// A state this client does not know about
    #[serde(other)]
    Other,
}

/// A prediction market as reported by `GET /api/markets`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub id: String,
    pub market_title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Opening probability of the first outcome, in `[0, 1]`
    pub initial_probability: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_liquidity: Option<f64>,
    /// Fee rate, in `[0, 1]`
    pub trading_fee: f64,
    pub status: MarketStatus,
    #[serde(default)]
    pub outcomes: Vec<String>,
    /// Name of the listing agent that created the market
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Market {
    pub fn probability_percent(&self) -> f64 {
        self.initial_probability * 100.0
    }

    pub fn fee_percent(&self) -> f64 {
        self.trading_fee * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_decodes_listing_agent_output() {
        let json = serde_json::json!({
            "id": "mkt_1",
            "creator": "Kimi-Lister",
            "created_at": "2025-01-01T00:00:00",
            "status": "active",
            "market_title": "Will BTC close above 100k?",
            "description": "Resolves on exchange close",
            "category": "crypto",
            "initial_probability": 0.42,
            "initial_liquidity": 20000.0,
            "trading_fee": 0.02,
            "outcomes": ["Yes", "No"],
            "decision": "create"
        });

        let market: Market = serde_json::from_value(json).unwrap();
        assert_eq!(market.id, "mkt_1");
        assert_eq!(market.status, MarketStatus::Active);
        assert_eq!(market.outcomes, vec!["Yes", "No"]);
        assert!((market.probability_percent() - 42.0).abs() < 1e-9);
        assert!((market.fee_percent() - 2.0).abs() < 1e-9);
        assert_eq!(market.creator.as_deref(), Some("Kimi-Lister"));
    }

    #[test]
    fn test_sparse_market_uses_defaults() {
        let json = serde_json::json!({
            "id": "mkt_2",
            "market_title": "Sparse",
            "initial_probability": 0.5,
            "trading_fee": 0.01,
            "status": "archived"
        });

        let market: Market = serde_json::from_value(json).unwrap();
        assert_eq!(market.status, MarketStatus::Other);
        assert!(market.outcomes.is_empty());
        assert_eq!(market.initial_liquidity, None);
    }

    #[test]
    fn test_missing_pricing_fields_are_malformed() {
        for missing in ["initial_probability", "trading_fee"] {
            let mut json = serde_json::json!({
                "id": "mkt_3",
                "market_title": "No pricing",
                "initial_probability": 0.3,
                "trading_fee": 0.02,
                "status": "active"
            });
            json.as_object_mut().unwrap().remove(missing);

            let err = serde_json::from_value::<Market>(json).unwrap_err();
            assert!(err.to_string().contains(missing), "{}", err);
        }
    }
}
