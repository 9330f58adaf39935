//! The per-action mutation flow: validate, await the server, then either
//! reconcile the local snapshot or return it untouched.

use oplps_core::{MutationKind, MutationRequest, PartRecord, reconcile, validate_mutation};

use crate::api::ApiClient;
use crate::error::ApiError;

/// Lifecycle of one pending action. There are no intermediate states and no
/// partial application; `AwaitingServerResponse` is exited exactly once, by
/// exactly one outcome.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MutationPhase {
    Idle,
    AwaitingServerResponse,
    Reconciled,
    Failed,
}

impl MutationPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationPhase::Idle => "idle",
            MutationPhase::AwaitingServerResponse => "awaiting_server_response",
            MutationPhase::Reconciled => "reconciled",
            MutationPhase::Failed => "failed",
        }
    }
}

/// Terminal result of one mutation flow. The failure arm hands the caller's
/// snapshot back untouched so the error path can never leak a half-applied
/// collection.
#[derive(Debug)]
pub enum MutationOutcome {
    Reconciled(Vec<PartRecord>),
    Failed {
        parts: Vec<PartRecord>,
        error: ApiError,
    },
}

impl MutationOutcome {
    pub fn phase(&self) -> MutationPhase {
        match self {
            MutationOutcome::Reconciled(_) => MutationPhase::Reconciled,
            MutationOutcome::Failed { .. } => MutationPhase::Failed,
        }
    }
}

/// Run the full flow for one quantity-reducing action.
///
/// Validation failures short-circuit before any network activity. The
/// reconciler runs only after the server has confirmed the mutation, never
/// speculatively and never on failure. Callers preferring the consistency path
/// can ignore the reconciled snapshot and re-fetch instead; this function
/// never re-fetches on their behalf.
pub async fn submit_mutation(
    client: &ApiClient,
    parts: Vec<PartRecord>,
    request: &MutationRequest,
) -> MutationOutcome {
    let Some(target) = parts.iter().find(|p| p.id == request.part_id) else {
        return MutationOutcome::Failed {
            parts,
            error: ApiError::Validation(oplps_core::DomainError::not_found()),
        };
    };

    if let Err(err) =
        validate_mutation(target, request.kind, request.quantity, request.remark.as_deref())
    {
        return MutationOutcome::Failed {
            parts,
            error: ApiError::Validation(err),
        };
    }

    tracing::debug!(
        part_id = %request.part_id,
        correlation_id = %request.correlation_id,
        phase = MutationPhase::AwaitingServerResponse.as_str(),
        "mutation validated, awaiting server"
    );

    let result = match request.kind {
        MutationKind::IssueOut => client.issue_out(request).await,
        MutationKind::Damage => client.mark_damaged(request).await,
    };

    settle(parts, request, result)
}

/// Apply exactly one terminal transition for a confirmed-or-failed remote
/// call. Split from [`submit_mutation`] so the reconcile-on-success /
/// untouched-on-failure contract is testable without a transport.
pub fn settle(
    parts: Vec<PartRecord>,
    request: &MutationRequest,
    result: Result<(), ApiError>,
) -> MutationOutcome {
    match result {
        Ok(()) => {
            let reconciled = reconcile(parts, request.part_id, request.quantity);
            tracing::debug!(
                part_id = %request.part_id,
                correlation_id = %request.correlation_id,
                phase = MutationPhase::Reconciled.as_str(),
                "server confirmed, local snapshot reconciled"
            );
            MutationOutcome::Reconciled(reconciled)
        }
        Err(error) => {
            tracing::warn!(
                part_id = %request.part_id,
                correlation_id = %request.correlation_id,
                phase = MutationPhase::Failed.as_str(),
                error = %error,
                "mutation failed, local snapshot untouched"
            );
            MutationOutcome::Failed { parts, error }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oplps_core::{MutationKind, PartId, UserId};

    fn part(id: i64, quantity: i64) -> PartRecord {
        PartRecord {
            id: PartId::new(id),
            part_no: format!("LP-{id:04}"),
            quantity,
            part_type: "bolt".to_string(),
            status: "in_store".to_string(),
            created_on: Some("2026-05-01 09:30:00".to_string()),
            updated_on: None,
            created_by: None,
            approved_by: Some("supervisor1".parse().unwrap()),
            approved_on: None,
        }
    }

    fn request(id: i64, quantity: i64) -> MutationRequest {
        MutationRequest::new(
            PartId::new(id),
            MutationKind::IssueOut,
            quantity,
            None,
            UserId::new("storekeeper1").unwrap(),
        )
    }

    #[test]
    fn confirmed_call_reconciles() {
        let parts = vec![part(1, 5), part(2, 9)];
        match settle(parts, &request(1, 5), Ok(())) {
            MutationOutcome::Reconciled(after) => {
                assert_eq!(after.len(), 1);
                assert_eq!(after[0].id, PartId::new(2));
            }
            other => panic!("expected Reconciled, got {other:?}"),
        }
    }

    #[test]
    fn failed_call_returns_the_snapshot_untouched() {
        let parts = vec![part(1, 5), part(2, 9)];
        let before = parts.clone();
        let outcome = settle(
            parts,
            &request(1, 5),
            Err(ApiError::Network("connection reset".into())),
        );
        match outcome {
            MutationOutcome::Failed { parts, error } => {
                assert_eq!(parts, before);
                assert!(matches!(error, ApiError::Network(_)));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn validation_failure_short_circuits_before_the_network() {
        // The base URL is unroutable; reaching the transport would error
        // with Network, so a Validation outcome proves no call was made.
        let client = ApiClient::new("http://127.0.0.1:0");
        let parts = vec![part(1, 5)];
        let before = parts.clone();

        let outcome = submit_mutation(&client, parts, &request(1, 6)).await;
        match outcome {
            MutationOutcome::Failed { parts, error } => {
                assert_eq!(parts, before);
                assert!(error.is_validation());
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_target_short_circuits_before_the_network() {
        let client = ApiClient::new("http://127.0.0.1:0");
        let outcome = submit_mutation(&client, vec![part(1, 5)], &request(99, 1)).await;
        match outcome {
            MutationOutcome::Failed { error, .. } => assert!(error.is_validation()),
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
