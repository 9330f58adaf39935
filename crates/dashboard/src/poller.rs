//! Background badge-refresh poller.
//!
//! Runs on a fixed interval independent of user actions, re-fetches the part
//! collection, and publishes fresh badge counts on a watch channel. The
//! timer lives inside a task whose handle the owner keeps; teardown is
//! explicit (notify, then await), so no orphaned timer survives the owner.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{Notify, watch};

use oplps_client::{ApiClient, ApiResult};
use oplps_core::PartRecord;
use oplps_views::{BadgeCounts, badge_counts};

/// Source of part collections for the poller. Implemented by [`ApiClient`];
/// tests substitute a stub.
pub trait PartsSource: Send + Sync + 'static {
    fn fetch_parts(&self) -> impl Future<Output = ApiResult<Vec<PartRecord>>> + Send;
}

impl PartsSource for ApiClient {
    fn fetch_parts(&self) -> impl Future<Output = ApiResult<Vec<PartRecord>>> + Send {
        self.list_parts()
    }
}

/// Periodic badge aggregation over a [`PartsSource`].
pub struct BadgePoller<S: PartsSource> {
    source: Arc<S>,
    interval: Duration,
    shutdown: Arc<Notify>,
    tx: watch::Sender<BadgeCounts>,
    rx: watch::Receiver<BadgeCounts>,
}

/// Handle to a started poller; dropping it without calling [`stop`] leaves
/// the task running, so owners should stop it on teardown.
///
/// [`stop`]: PollerHandle::stop
pub struct PollerHandle {
    shutdown: Arc<Notify>,
    join: tokio::task::JoinHandle<()>,
}

impl PollerHandle {
    /// Request shutdown and wait for the task to exit.
    pub async fn stop(self) {
        self.shutdown.notify_one();
        let _ = self.join.await;
    }
}

impl<S: PartsSource> BadgePoller<S> {
    pub fn new(source: S, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(BadgeCounts::default());
        Self {
            source: Arc::new(source),
            interval,
            shutdown: Arc::new(Notify::new()),
            tx,
            rx,
        }
    }

    /// Receiver for badge updates; grab before [`Self::start`] consumes the
    /// poller.
    pub fn subscribe(&self) -> watch::Receiver<BadgeCounts> {
        self.rx.clone()
    }

    /// Spawn the polling task. Fetch failures are logged and the tick is
    /// skipped; the poller only exits on shutdown.
    pub fn start(self) -> PollerHandle {
        let shutdown = self.shutdown.clone();
        let source = self.source;
        let tx = self.tx;
        let interval = self.interval;
        let shutdown_for_task = shutdown.clone();

        let join = tokio::spawn(async move {
            tracing::debug!(interval_secs = interval.as_secs(), "badge poller started");

            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = shutdown_for_task.notified() => {
                        tracing::debug!("badge poller received shutdown signal");
                        break;
                    }
                    _ = ticker.tick() => {
                        match source.fetch_parts().await {
                            Ok(parts) => {
                                let counts = badge_counts(&parts, Utc::now());
                                // send only fails when every receiver is
                                // gone, which just means nobody is watching.
                                let _ = tx.send(counts);
                            }
                            Err(err) => {
                                tracing::warn!(error = %err, "badge refresh failed, skipping tick");
                            }
                        }
                    }
                }
            }

            tracing::debug!("badge poller stopped");
        });

        PollerHandle { shutdown, join }
    }
}
