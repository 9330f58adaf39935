//! HTTP client for the remote part/event API.

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use oplps_core::{HistoryEvent, MutationRequest, PartId, PartRecord, UserId};

use crate::envelope::ApiEnvelope;
use crate::error::{ApiError, ApiResult, GENERIC_FAILURE};

/// Client for the remote OPLPS dashboard API.
///
/// Timeouts are whatever the underlying transport defaults to, and requests
/// are not abortable once issued; callers that go away simply drop the
/// response (and must not reconcile afterwards).
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

/// Body for registering a new part.
#[derive(Debug, Clone, Serialize)]
pub struct NewPart {
    pub part_no: String,
    pub quantity: i64,
    pub part_type: String,
}

/// Wire body for issue-out/damage requests.
#[derive(Debug, Serialize)]
struct MutationBody<'a> {
    quantity: i64,
    remark: Option<&'a str>,
    performed_by: &'a str,
    correlation_id: Uuid,
}

/// Wire body for approvals.
#[derive(Debug, Serialize)]
struct ApproveBody<'a> {
    approved_by: &'a str,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            http: reqwest::Client::new(),
        }
    }

    pub fn with_token(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::new(base_url)
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// All part records visible to the client.
    pub async fn list_parts(&self) -> ApiResult<Vec<PartRecord>> {
        self.get_json("/parts").await
    }

    /// Part records still awaiting approval.
    pub async fn list_pending_parts(&self) -> ApiResult<Vec<PartRecord>> {
        self.get_json("/parts/pending").await
    }

    /// The append-only action log.
    pub async fn list_history(&self) -> ApiResult<Vec<HistoryEvent>> {
        self.get_json("/history").await
    }

    /// Issue parts out of the store. Success means the server committed the
    /// reduction; the caller may then reconcile its local snapshot.
    pub async fn issue_out(&self, request: &MutationRequest) -> ApiResult<()> {
        self.post_mutation("issue-out", request).await
    }

    /// Mark parts damaged. Same confirmation contract as [`Self::issue_out`].
    pub async fn mark_damaged(&self, request: &MutationRequest) -> ApiResult<()> {
        self.post_mutation("damage", request).await
    }

    /// Approve a pending part entry.
    pub async fn approve_part(&self, part_id: PartId, approver: &UserId) -> ApiResult<()> {
        let path = format!("/parts/{part_id}/approve");
        let body = ApproveBody {
            approved_by: approver.as_str(),
        };
        self.send_ack(self.http.put(self.url(&path)).json(&body))
            .await
    }

    /// Register a new part entry (lands in the pending list until approved).
    pub async fn register_part(&self, part: &NewPart) -> ApiResult<()> {
        self.send_ack(self.http.post(self.url("/parts")).json(part))
            .await
    }

    async fn post_mutation(&self, action: &str, request: &MutationRequest) -> ApiResult<()> {
        let path = format!("/parts/{}/{}", request.part_id, action);
        let body = MutationBody {
            quantity: request.quantity,
            remark: request.remark.as_deref(),
            performed_by: request.performed_by.as_str(),
            correlation_id: request.correlation_id,
        };
        tracing::info!(
            part_id = %request.part_id,
            action,
            quantity = request.quantity,
            correlation_id = %request.correlation_id,
            "submitting mutation"
        );
        self.send_ack(self.http.post(self.url(&path)).json(&body))
            .await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let envelope: ApiEnvelope<T> = self.send(self.http.get(self.url(path))).await?;
        envelope.into_result()
    }

    async fn send_ack(&self, request: reqwest::RequestBuilder) -> ApiResult<()> {
        let envelope: ApiEnvelope<serde_json::Value> = self.send(request).await?;
        envelope.into_ack()
    }

    async fn send<T: DeserializeOwned>(
        &self,
        mut request: reqwest::RequestBuilder,
    ) -> ApiResult<ApiEnvelope<T>> {
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(api_error_from_http(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Map a non-success HTTP response to an [`ApiError`], salvaging the server
/// message when the body is still envelope-shaped.
fn api_error_from_http(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body)
        .ok()
        .and_then(|envelope| envelope.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE.to_string());
    ApiError::Api {
        status: Some(status),
        message,
    }
}
