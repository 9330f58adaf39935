//! Sidebar badge aggregation and dashboard metrics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use oplps_core::{Bucket, PartRecord, classify};

/// Per-bucket overdue counts shown as sidebar badges. Each part is counted
/// once, in its own bucket.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BadgeCounts {
    pub over14: usize,
    pub over30: usize,
    pub over90: usize,
}

impl BadgeCounts {
    pub fn total(&self) -> usize {
        self.over14 + self.over30 + self.over90
    }
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardMetrics {
    pub total_parts: usize,
    pub total_units: i64,
    pub pending_approval: usize,
    pub overdue: BadgeCounts,
}

/// Aggregate overdue counts for the sidebar badge.
pub fn badge_counts(parts: &[PartRecord], now: DateTime<Utc>) -> BadgeCounts {
    let mut counts = BadgeCounts::default();
    for part in parts {
        match classify(part.created_on.as_deref(), now).bucket {
            Bucket::Current => {}
            Bucket::Over14 => counts.over14 += 1,
            Bucket::Over30 => counts.over30 += 1,
            Bucket::Over90 => counts.over90 += 1,
        }
    }
    counts
}

/// Headline dashboard metrics over the current and pending collections.
pub fn dashboard_metrics(
    parts: &[PartRecord],
    pending: &[PartRecord],
    now: DateTime<Utc>,
) -> DashboardMetrics {
    DashboardMetrics {
        total_parts: parts.len(),
        total_units: parts.iter().map(|p| p.quantity).sum(),
        pending_approval: pending.len(),
        overdue: badge_counts(parts, now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use oplps_core::{PartId, UserId};

    fn now() -> DateTime<Utc> {
        "2026-08-30T10:15:00Z".parse().unwrap()
    }

    fn part(id: i64, quantity: i64, created_days_ago: Option<i64>) -> PartRecord {
        PartRecord {
            id: PartId::new(id),
            part_no: format!("LP-{id:04}"),
            quantity,
            part_type: "bolt".to_string(),
            status: "in_store".to_string(),
            created_on: created_days_ago
                .map(|n| (now() - Duration::days(n)).format("%Y-%m-%d %H:%M:%S").to_string()),
            updated_on: None,
            created_by: None,
            approved_by: Some(UserId::new("supervisor1").unwrap()),
            approved_on: None,
        }
    }

    #[test]
    fn each_part_lands_in_exactly_one_bucket() {
        let parts = vec![
            part(1, 1, Some(5)),
            part(2, 2, Some(20)),
            part(3, 3, Some(45)),
            part(4, 4, Some(200)),
            part(5, 5, None),
        ];
        let counts = badge_counts(&parts, now());
        assert_eq!(counts, BadgeCounts { over14: 1, over30: 1, over90: 1 });
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn metrics_roll_up_parts_pending_and_badges() {
        let parts = vec![part(1, 10, Some(95)), part(2, 4, Some(2))];
        let pending = vec![part(3, 7, Some(1))];

        let metrics = dashboard_metrics(&parts, &pending, now());
        assert_eq!(metrics.total_parts, 2);
        assert_eq!(metrics.total_units, 14);
        assert_eq!(metrics.pending_approval, 1);
        assert_eq!(metrics.overdue.over90, 1);
        assert_eq!(metrics.overdue.total(), 1);
    }

    /// Badges and the notification list must agree: same classifier, same
    /// reference field, same instant.
    #[test]
    fn badges_agree_with_notifications() {
        let parts = vec![
            part(1, 1, Some(13)),
            part(2, 1, Some(14)),
            part(3, 1, Some(31)),
            part(4, 1, Some(91)),
            part(5, 1, None),
        ];
        let counts = badge_counts(&parts, now());
        let rows = crate::notifications::notifications(&parts, now());
        assert_eq!(counts.total(), rows.len());
    }
}
