//! Optimistic reconciliation of the local part collection after a confirmed
//! quantity-reducing mutation.
//!
//! This is the fast path: callers that prefer full consistency discard local
//! state and re-fetch instead. The two are never combined in one call, and
//! this function must only run after the remote mutation has been confirmed
//! (see `oplps-client`).

use crate::id::PartId;
use crate::part::PartRecord;

/// Apply the known effect of a confirmed mutation to a local snapshot.
///
/// The target's quantity is reduced by `delta`; if nothing remains the
/// target is removed outright. All other records and the relative order of
/// the survivors are untouched. An unknown `target` is a pass-through:
/// preconditions (target present, `0 < delta <= quantity`) are enforced by
/// validation before the remote call is ever issued.
pub fn reconcile(parts: Vec<PartRecord>, target: PartId, delta: i64) -> Vec<PartRecord> {
    parts
        .into_iter()
        .filter_map(|part| {
            if part.id != target {
                return Some(part);
            }
            let remaining = part.quantity - delta;
            if remaining <= 0 {
                None
            } else {
                Some(PartRecord {
                    quantity: remaining,
                    ..part
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(id: i64, part_no: &str, quantity: i64) -> PartRecord {
        PartRecord {
            id: PartId::new(id),
            part_no: part_no.to_string(),
            quantity,
            part_type: "bolt".to_string(),
            status: "in_store".to_string(),
            created_on: Some("2026-05-01 09:30:00".to_string()),
            updated_on: None,
            created_by: None,
            approved_by: Some("supervisor1".parse().unwrap()),
            approved_on: Some("2026-05-02 08:00:00".to_string()),
        }
    }

    #[test]
    fn exhausting_delta_removes_the_target() {
        let parts = vec![part(1, "LP-0001", 5), part(2, "LP-0002", 9)];
        let after = reconcile(parts, PartId::new(1), 5);
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].id, PartId::new(2));
    }

    #[test]
    fn partial_delta_decrements_and_preserves_siblings() {
        let parts = vec![part(1, "LP-0001", 5), part(2, "LP-0002", 9), part(3, "LP-0003", 1)];
        let before = parts.clone();

        let after = reconcile(parts, PartId::new(1), 3);

        assert_eq!(after.len(), 3);
        assert_eq!(after[0].quantity, 2);
        // Everything except the quantity is untouched.
        assert_eq!(
            PartRecord { quantity: 5, ..after[0].clone() },
            before[0]
        );
        // Siblings and their order are untouched.
        assert_eq!(&after[1..], &before[1..]);
    }

    #[test]
    fn unknown_target_is_a_pass_through() {
        let parts = vec![part(1, "LP-0001", 5)];
        let before = parts.clone();
        assert_eq!(reconcile(parts, PartId::new(99), 1), before);
    }

    #[test]
    fn over_delta_also_removes_rather_than_going_negative() {
        // Validation forbids this before a remote call, but a confirmed
        // server effect larger than local knowledge must still never leave a
        // negative quantity behind.
        let parts = vec![part(1, "LP-0001", 2)];
        assert!(reconcile(parts, PartId::new(1), 5).is_empty());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: non-target records survive byte-for-byte, in order.
            #[test]
            fn non_targets_are_preserved(
                quantities in proptest::collection::vec(1i64..100, 1..8),
                target_idx in 0usize..8,
                delta in 1i64..100,
            ) {
                let parts: Vec<PartRecord> = quantities
                    .iter()
                    .enumerate()
                    .map(|(i, &q)| part(i as i64, &format!("LP-{i:04}"), q))
                    .collect();
                let target_idx = target_idx % parts.len();
                let target = parts[target_idx].id;
                let expected_rest: Vec<PartRecord> = parts
                    .iter()
                    .filter(|p| p.id != target)
                    .cloned()
                    .collect();

                let after = reconcile(parts, target, delta);

                let rest: Vec<PartRecord> = after
                    .iter()
                    .filter(|p| p.id != target)
                    .cloned()
                    .collect();
                prop_assert_eq!(rest, expected_rest);
            }
        }
    }
}
