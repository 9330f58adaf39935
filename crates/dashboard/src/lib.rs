//! `oplps-dashboard` — application shell for the loose-parts dashboard.
//!
//! Wires the pure domain (`oplps-core`), the API client (`oplps-client`),
//! and the projections (`oplps-views`) into shared state, action handlers,
//! and the background badge poller.

pub mod actions;
pub mod config;
pub mod poller;
pub mod state;

pub use config::Config;
pub use poller::{BadgePoller, PartsSource, PollerHandle};
pub use state::AppState;
