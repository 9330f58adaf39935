//! Shared in-memory state: advisory local copies of the server's
//! collections, always superseded by the next full fetch.

use std::collections::HashSet;
use std::sync::Mutex;

use tokio::sync::RwLock;

use oplps_client::{ApiClient, ApiResult};
use oplps_core::{HistoryEvent, PartId, PartRecord};

/// Local snapshots plus the in-flight action set.
///
/// The collections are optimistic mirrors of server state; `refresh_*` is
/// the consistency path (discard and re-fetch), `apply_parts` the fast path
/// (store a reconciled snapshot).
#[derive(Debug, Default)]
pub struct AppState {
    parts: RwLock<Vec<PartRecord>>,
    pending: RwLock<Vec<PartRecord>>,
    history: RwLock<Vec<HistoryEvent>>,
    in_flight: Mutex<HashSet<PartId>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn parts_snapshot(&self) -> Vec<PartRecord> {
        self.parts.read().await.clone()
    }

    pub async fn pending_snapshot(&self) -> Vec<PartRecord> {
        self.pending.read().await.clone()
    }

    pub async fn history_snapshot(&self) -> Vec<HistoryEvent> {
        self.history.read().await.clone()
    }

    /// Store a reconciled snapshot (fast path after a confirmed mutation).
    pub async fn apply_parts(&self, parts: Vec<PartRecord>) {
        *self.parts.write().await = parts;
    }

    /// Discard the local parts copy and re-fetch (consistency path).
    pub async fn refresh_parts(&self, client: &ApiClient) -> ApiResult<()> {
        let fresh = client.list_parts().await?;
        *self.parts.write().await = fresh;
        Ok(())
    }

    pub async fn refresh_pending(&self, client: &ApiClient) -> ApiResult<()> {
        let fresh = client.list_pending_parts().await?;
        *self.pending.write().await = fresh;
        Ok(())
    }

    pub async fn refresh_history(&self, client: &ApiClient) -> ApiResult<()> {
        let fresh = client.list_history().await?;
        *self.history.write().await = fresh;
        Ok(())
    }

    /// Mark a part as having a mutation in flight. Returns `false` when one
    /// is already pending for the same part; the caller must then reject the
    /// duplicate submission instead of issuing a second request.
    pub(crate) fn begin_action(&self, part_id: PartId) -> bool {
        self.in_flight
            .lock()
            .expect("in-flight set poisoned")
            .insert(part_id)
    }

    pub(crate) fn end_action(&self, part_id: PartId) {
        self.in_flight
            .lock()
            .expect("in-flight set poisoned")
            .remove(&part_id);
    }
}
