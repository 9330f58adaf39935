//! History-log projection.

use oplps_core::{ActionKind, HistoryEvent};

/// Optional criteria for the history table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub action: Option<ActionKind>,
    /// Case-insensitive substring match on the part number.
    pub part_no_contains: Option<String>,
}

impl HistoryFilter {
    fn matches(&self, event: &HistoryEvent) -> bool {
        if let Some(action) = &self.action {
            if &event.action != action {
                return false;
            }
        }
        if let Some(needle) = &self.part_no_contains {
            if !event
                .part_no
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

/// Project history rows newest-first.
///
/// The server timestamp format is fixed-width (`YYYY-MM-DD HH:MM:SS`), so
/// lexicographic order is chronological order; events with no timestamp
/// sort last.
pub fn history_rows<'a>(events: &'a [HistoryEvent], filter: &HistoryFilter) -> Vec<&'a HistoryEvent> {
    let mut rows: Vec<&HistoryEvent> = events.iter().filter(|e| filter.matches(e)).collect();
    rows.sort_by(|a, b| b.action_on.cmp(&a.action_on).then_with(|| b.id.cmp(&a.id)));
    rows
}
