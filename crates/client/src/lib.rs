//! `oplps-client` — async client for the remote OPLPS REST API.
//!
//! The server is the sole source of truth; this crate only reads (GET) and
//! issues mutation requests (POST/PUT) whose confirmed effects the caller
//! may mirror locally via the reconciler in `oplps-core`.

pub mod api;
pub mod envelope;
pub mod error;
pub mod flow;

pub use api::{ApiClient, NewPart};
pub use envelope::ApiEnvelope;
pub use error::{ApiError, ApiResult, GENERIC_FAILURE};
pub use flow::{MutationOutcome, MutationPhase, settle, submit_mutation};
