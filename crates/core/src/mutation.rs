//! Quantity-reducing mutation requests and their pre-network validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::id::{PartId, UserId};
use crate::part::PartRecord;

/// Kind of quantity-reducing mutation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    /// Issue parts out of the store. Remark is optional.
    IssueOut,
    /// Mark parts damaged. Remark is mandatory.
    Damage,
}

impl MutationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationKind::IssueOut => "issue_out",
            MutationKind::Damage => "damage",
        }
    }

    pub fn remark_required(&self) -> bool {
        matches!(self, MutationKind::Damage)
    }
}

/// A validated-at-the-edge request to reduce a part's quantity.
///
/// `correlation_id` is minted client-side (UUIDv7) and travels with the
/// request purely for log correlation; the server does not interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationRequest {
    pub part_id: PartId,
    pub kind: MutationKind,
    pub quantity: i64,
    pub remark: Option<String>,
    pub performed_by: UserId,
    pub correlation_id: Uuid,
}

impl MutationRequest {
    pub fn new(
        part_id: PartId,
        kind: MutationKind,
        quantity: i64,
        remark: Option<String>,
        performed_by: UserId,
    ) -> Self {
        Self {
            part_id,
            kind,
            quantity,
            remark,
            performed_by,
            correlation_id: Uuid::now_v7(),
        }
    }
}

/// Validate a mutation against the current local view of its target.
///
/// Checks run in order and short-circuit; a violation means no network call
/// is made and the caller reports the message synchronously.
pub fn validate_mutation(
    part: &PartRecord,
    kind: MutationKind,
    quantity: i64,
    remark: Option<&str>,
) -> DomainResult<()> {
    if !part.is_actionable() {
        return Err(DomainError::validation(format!(
            "part {} is not actionable (unapproved or out of stock)",
            part.part_no
        )));
    }
    if quantity <= 0 {
        return Err(DomainError::validation(
            "quantity must be a positive integer",
        ));
    }
    if quantity > part.quantity {
        return Err(DomainError::validation(format!(
            "quantity {} exceeds available stock {}",
            quantity, part.quantity
        )));
    }
    if kind.remark_required() && remark.is_none_or(|r| r.trim().is_empty()) {
        return Err(DomainError::validation(
            "a remark is required when marking damage",
        ));
    }
    Ok(())
}
