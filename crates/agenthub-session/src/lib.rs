//! AgentHub Session - client-side state for the simulation monitor
//!
//! A [`Session`] owns everything the monitor knows about the remote
//! simulation while it is running:
//!
//! - [`RemoteStateCache`]: last successfully fetched status and market list
//! - [`Poller`]: periodic status refresh, cancelled when the session ends
//! - [`CycleController`]: single-flight runner for cycle and phase mutations
//! - [`LogBuffer`]: bounded newest-first run log of client events
//!
//! # Data flow
//!
//! ```text
//! Poller ──────────┐
//!                  ├──→ RemoteStateCache ──┐
//! CycleController ─┤                       ├──→ SessionView ──→ renderers
//!                  └──→ LogBuffer ─────────┘
//! ```
//!
//! Renderers only ever see a [`SessionView`] snapshot and never mutate the
//! session.

pub mod cache;
pub mod cycle;
pub mod log;
mod messages;
pub mod poller;
pub mod session;

#[cfg(test)]
mod testing;

pub use cache::{RefreshOutcome, RemoteStateCache};
pub use cycle::{CycleController, CycleState, RunOutcome};
pub use log::{LogBuffer, LogEntry, DEFAULT_LOG_CAPACITY};
pub use poller::{Poller, DEFAULT_POLL_INTERVAL};
pub use session::{Session, SessionConfig, SessionView};
