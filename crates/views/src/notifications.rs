//! The overdue-parts notification list.

use chrono::{DateTime, Utc};
use serde::Serialize;

use oplps_core::{Bucket, PartId, PartRecord, classify};

/// One row in the notification list: a part whose age has crossed at least
/// the first threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub part_id: PartId,
    pub part_no: String,
    pub days: i64,
    pub bucket: Bucket,
}

/// Project the overdue notifications out of a part collection.
///
/// Parts with unset or unparsable reference dates never appear (they
/// classify as current). Oldest parts sort first.
pub fn notifications(parts: &[PartRecord], now: DateTime<Utc>) -> Vec<Notification> {
    let mut rows: Vec<Notification> = parts
        .iter()
        .filter_map(|part| {
            let age = classify(part.created_on.as_deref(), now);
            if !age.bucket.is_overdue() {
                return None;
            }
            // An overdue bucket implies a parsed day count.
            let days = age.days?;
            Some(Notification {
                part_id: part.id,
                part_no: part.part_no.clone(),
                days,
                bucket: age.bucket,
            })
        })
        .collect();

    rows.sort_by(|a, b| b.days.cmp(&a.days).then_with(|| a.part_id.cmp(&b.part_id)));
    rows
}
