//! Action handlers: validate → remote call → reconcile-or-report.
//!
//! Each handler takes the session explicitly and holds a per-part in-flight
//! guard for the duration of the request, which is what the disabled submit
//! control is in the browser UI: the same part cannot be submitted twice
//! concurrently. Actions against distinct parts are independent and
//! uncoordinated.

use oplps_client::{ApiClient, MutationOutcome, NewPart, submit_mutation};
use oplps_core::{MutationKind, MutationRequest, PartId, Session};

use crate::state::AppState;

/// Releases the in-flight slot when the action handler exits, on every path.
struct InFlightGuard<'a> {
    state: &'a AppState,
    part_id: PartId,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(state: &'a AppState, part_id: PartId) -> Option<Self> {
        state.begin_action(part_id).then_some(Self { state, part_id })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.state.end_action(self.part_id);
    }
}

/// Issue parts out of the store. Remark is optional.
pub async fn issue_out_action(
    state: &AppState,
    client: &ApiClient,
    session: &Session,
    part_id: PartId,
    quantity: i64,
    remark: Option<String>,
) -> Result<(), String> {
    run_mutation(state, client, session, part_id, MutationKind::IssueOut, quantity, remark).await
}

/// Mark parts damaged. Remark is mandatory (enforced by validation).
pub async fn damage_action(
    state: &AppState,
    client: &ApiClient,
    session: &Session,
    part_id: PartId,
    quantity: i64,
    remark: Option<String>,
) -> Result<(), String> {
    run_mutation(state, client, session, part_id, MutationKind::Damage, quantity, remark).await
}

async fn run_mutation(
    state: &AppState,
    client: &ApiClient,
    session: &Session,
    part_id: PartId,
    kind: MutationKind,
    quantity: i64,
    remark: Option<String>,
) -> Result<(), String> {
    let Some(_guard) = InFlightGuard::acquire(state, part_id) else {
        return Err(format!("an action for part {part_id} is already in progress"));
    };

    let request = MutationRequest::new(part_id, kind, quantity, remark, session.user_id().clone());
    let parts = state.parts_snapshot().await;

    match submit_mutation(client, parts, &request).await {
        MutationOutcome::Reconciled(after) => {
            state.apply_parts(after).await;
            Ok(())
        }
        MutationOutcome::Failed { error, .. } => Err(error.user_message()),
    }
}

/// Approve a pending entry. Supervisor-only; on success the pending list is
/// re-fetched (approval changes fields reconciliation does not model, so the
/// consistency path is the right one here).
pub async fn approve_action(
    state: &AppState,
    client: &ApiClient,
    session: &Session,
    part_id: PartId,
) -> Result<(), String> {
    if !session.can_approve() {
        return Err("only a supervisor can approve pending entries".to_string());
    }

    let Some(_guard) = InFlightGuard::acquire(state, part_id) else {
        return Err(format!("an action for part {part_id} is already in progress"));
    };

    client
        .approve_part(part_id, session.user_id())
        .await
        .map_err(|e| e.user_message())?;

    if let Err(err) = state.refresh_pending(client).await {
        // The approval itself succeeded; a stale pending list self-heals on
        // the next refresh.
        tracing::warn!(error = %err, "pending list refresh after approval failed");
    }
    if let Err(err) = state.refresh_parts(client).await {
        tracing::warn!(error = %err, "parts refresh after approval failed");
    }
    Ok(())
}

/// Register a new part entry; it lands in the pending list until a
/// supervisor approves it.
pub async fn register_action(
    state: &AppState,
    client: &ApiClient,
    _session: &Session,
    part: NewPart,
) -> Result<(), String> {
    if part.part_no.trim().is_empty() {
        return Err("part number cannot be blank".to_string());
    }
    if part.quantity <= 0 {
        return Err("quantity must be a positive integer".to_string());
    }

    client.register_part(&part).await.map_err(|e| e.user_message())?;

    if let Err(err) = state.refresh_pending(client).await {
        tracing::warn!(error = %err, "pending list refresh after registration failed");
    }
    Ok(())
}
