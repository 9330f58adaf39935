//! `oplps-views` — client-side projections over the fetched collections.
//!
//! Every projection is a pure function of the part/history collections plus
//! an explicit "now"; nothing here fetches, caches, or mutates. Badges,
//! metrics, and notifications all delegate aging to
//! [`oplps_core::aging::classify`], which is what keeps the three views in
//! agreement for a given part and instant of evaluation.

pub mod badges;
pub mod filter;
pub mod history;
pub mod notifications;

pub use badges::{BadgeCounts, DashboardMetrics, badge_counts, dashboard_metrics};
pub use filter::{PartFilter, filter_parts};
pub use history::{HistoryFilter, history_rows};
pub use notifications::{Notification, notifications};
