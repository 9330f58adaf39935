//! Append-only history events as consumed from the remote API.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::id::EventId;
use crate::part::de_lenient_i64;

/// Kind of action recorded in the history log.
///
/// The wire format is the server's action-type string; unrecognized values
/// are preserved rather than dropped so new server-side action types do not
/// break history rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    IssueOut,
    Damage,
    Register,
    Approve,
    Other(String),
}

impl ActionKind {
    pub fn as_str(&self) -> &str {
        match self {
            ActionKind::IssueOut => "issue_out",
            ActionKind::Damage => "damage",
            ActionKind::Register => "register",
            ActionKind::Approve => "approve",
            ActionKind::Other(s) => s,
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw {
            "issue_out" => ActionKind::IssueOut,
            "damage" => ActionKind::Damage,
            "register" => ActionKind::Register,
            "approve" => ActionKind::Approve,
            other => ActionKind::Other(other.to_string()),
        }
    }
}

impl Serialize for ActionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActionKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ActionKind::parse(&raw))
    }
}

/// One entry in the server's append-only action log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub id: EventId,
    pub part_no: String,
    pub part_type: String,
    #[serde(deserialize_with = "de_lenient_i64")]
    pub quantity_changed: i64,
    #[serde(default, deserialize_with = "crate::part::de_lenient_opt_i64")]
    pub quantity_after: Option<i64>,
    pub remark: Option<String>,
    pub performed_by: String,
    pub action_on: Option<String>,
    pub action: ActionKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_kind_round_trips_known_and_unknown() {
        for raw in ["issue_out", "damage", "register", "approve", "stocktake"] {
            let kind = ActionKind::parse(raw);
            assert_eq!(kind.as_str(), raw);
        }
        assert_eq!(ActionKind::parse("stocktake"), ActionKind::Other("stocktake".into()));
    }

    #[test]
    fn history_event_decodes_with_string_quantities() {
        let event: HistoryEvent = serde_json::from_str(
            r#"{
                "id": 301,
                "part_no": "LP-0007",
                "part_type": "bolt",
                "quantity_changed": "3",
                "quantity_after": "2",
                "remark": null,
                "performed_by": "storekeeper1",
                "action_on": "2026-06-12 14:00:00",
                "action": "issue_out"
            }"#,
        )
        .unwrap();
        assert_eq!(event.quantity_changed, 3);
        assert_eq!(event.quantity_after, Some(2));
        assert_eq!(event.action, ActionKind::IssueOut);
    }

    #[test]
    fn quantity_after_tolerates_null() {
        let event: HistoryEvent = serde_json::from_str(
            r#"{
                "id": 302,
                "part_no": "LP-0008",
                "part_type": "washer",
                "quantity_changed": 10,
                "quantity_after": null,
                "remark": "initial registration",
                "performed_by": "storekeeper2",
                "action_on": "2026-06-13 08:15:00",
                "action": "register"
            }"#,
        )
        .unwrap();
        assert_eq!(event.quantity_after, None);
        assert_eq!(event.action, ActionKind::Register);
    }
}
