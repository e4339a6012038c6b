//! AgentHub Types - Wire and display types for the prediction-market simulation
//!
//! This crate contains the foundational types shared by every other agenthub
//! crate, with zero dependencies on them. It defines:
//!
//! - The status snapshot reported by `GET /api/status`
//! - Agents, their roles and their performance counters
//! - Prediction markets reported by `GET /api/markets`
//! - Cycle and phase reports returned by the `/api/cycle/*` mutations
//! - The agent classifier used by every rendering surface
//!
//! # Pipeline
//!
//! ```text
//! discovery → listing → audit → market_maker → trading → governance
//! ```

pub mod agent;
pub mod classifier;
pub mod cycle;
pub mod error;
pub mod market;
pub mod status;

pub use agent::*;
pub use classifier::*;
pub use cycle::*;
pub use error::*;
pub use market::*;
pub use status::*;
