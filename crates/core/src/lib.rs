//! `oplps-core` — domain foundation for the loose-parts tracking client.
//!
//! This crate contains **pure client-side domain** logic (no network, no
//! async, no ambient state): part and history records as consumed from the
//! remote API, the aging classifier, the optimistic mutation reconciler,
//! mutation validation, and the explicit session context.

pub mod aging;
pub mod error;
pub mod history;
pub mod id;
pub mod mutation;
pub mod part;
pub mod reconcile;
pub mod session;

pub use aging::{AgeClass, Bucket, classify, classify_days};
pub use error::{DomainError, DomainResult};
pub use history::{ActionKind, HistoryEvent};
pub use id::{EventId, PartId, UserId};
pub use mutation::{MutationKind, MutationRequest, validate_mutation};
pub use part::PartRecord;
pub use reconcile::reconcile;
pub use session::{Role, Session};
