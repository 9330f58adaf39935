//! Part records as consumed from the remote API.

use serde::{Deserialize, Deserializer, Serialize};

use crate::id::{PartId, UserId};

/// A loose-part record, read-only to this client.
///
/// Timestamps are kept verbatim as the server-local
/// `"YYYY-MM-DD HH:MM:SS"` strings the API emits; interpretation happens
/// in [`crate::aging`]. Quantities may arrive as JSON numbers or numeric
/// strings and are decoded leniently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartRecord {
    pub id: PartId,
    pub part_no: String,
    #[serde(deserialize_with = "de_lenient_i64")]
    pub quantity: i64,
    pub part_type: String,
    pub status: String,
    pub created_on: Option<String>,
    pub updated_on: Option<String>,
    pub created_by: Option<UserId>,
    pub approved_by: Option<UserId>,
    pub approved_on: Option<String>,
}

impl PartRecord {
    /// Whether the part is eligible for issue-out/damage actions.
    ///
    /// Invariant: actionable means approved (approver present) and in stock.
    pub fn is_actionable(&self) -> bool {
        self.approved_by.is_some() && self.quantity > 0
    }

    pub fn is_pending_approval(&self) -> bool {
        self.approved_by.is_none()
    }
}

/// Decode an integer that the server may send as a number or a numeric
/// string (e.g. `5` or `"5"`).
pub(crate) fn de_lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| serde::de::Error::custom(format!("non-numeric quantity {s:?}: {e}"))),
    }
}

/// Same as [`de_lenient_i64`] but tolerating an absent/null field.
pub(crate) fn de_lenient_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Num(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("non-numeric quantity {s:?}: {e}"))),
    }
}
