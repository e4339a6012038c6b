//! AgentHub Client - access to the remote simulation backend
//!
//! The monitor talks to the backend through the [`SimulationBackend`] trait.
//! [`BackendClient`] is the HTTP implementation; tests and embedders can
//! provide their own.
//!
//! # Endpoints
//!
//! ```text
//! GET  /                   reachability probe
//! GET  /api/status         system status snapshot
//! GET  /api/markets        market list
//! POST /api/cycle/run      run one full cycle
//! POST /api/cycle/{phase}  run a single phase
//! ```

pub mod backend;
pub mod client;
pub mod error;

pub use backend::SimulationBackend;
pub use client::{BackendClient, BackendInfo};
pub use error::{ClientError, ClientResult};
