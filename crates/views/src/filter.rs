//! Multi-criteria part-table filtering.
//!
//! Filters are plain data; a filter change means the caller re-runs
//! [`filter_parts`] over the current collection. There is no hidden
//! reactivity and no caching between runs.

use chrono::{DateTime, Utc};

use oplps_core::{Bucket, PartRecord, classify};

/// AND-combined filter criteria. An empty filter selects everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartFilter {
    /// Case-insensitive substring match on the part number.
    pub part_no_contains: Option<String>,
    /// Exact match on the type descriptor.
    pub part_type: Option<String>,
    /// Exact match on the status descriptor.
    pub status: Option<String>,
    /// Exact match on the aging bucket at evaluation time.
    pub bucket: Option<Bucket>,
}

impl PartFilter {
    pub fn is_empty(&self) -> bool {
        self.part_no_contains.is_none()
            && self.part_type.is_none()
            && self.status.is_none()
            && self.bucket.is_none()
    }

    fn matches(&self, part: &PartRecord, now: DateTime<Utc>) -> bool {
        if let Some(needle) = &self.part_no_contains {
            if !part
                .part_no
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        if let Some(part_type) = &self.part_type {
            if &part.part_type != part_type {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if &part.status != status {
                return false;
            }
        }
        if let Some(bucket) = self.bucket {
            if classify(part.created_on.as_deref(), now).bucket != bucket {
                return false;
            }
        }
        true
    }
}

/// Run the filter pipeline over a part collection, preserving order.
pub fn filter_parts<'a>(
    parts: &'a [PartRecord],
    filter: &PartFilter,
    now: DateTime<Utc>,
) -> Vec<&'a PartRecord> {
    parts.iter().filter(|p| filter.matches(p, now)).collect()
}
