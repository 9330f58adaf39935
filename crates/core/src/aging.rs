//! Aging classification: elapsed calendar days since a reference timestamp,
//! bucketed into ordinal severity levels.
//!
//! Every consumer of aging data (sidebar badges, dashboard metrics, the
//! notification list) must go through [`classify`] so that a given reference
//! timestamp yields the same bucket everywhere for the same instant of
//! evaluation.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ordinal aging severity. Ordering is severity order:
/// `Current < Over14 < Over30 < Over90`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Bucket {
    #[serde(rename = "ok")]
    Current,
    #[serde(rename = "gt14")]
    Over14,
    #[serde(rename = "gt30")]
    Over30,
    #[serde(rename = "gt90")]
    Over90,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Current => "ok",
            Bucket::Over14 => "gt14",
            Bucket::Over30 => "gt30",
            Bucket::Over90 => "gt90",
        }
    }

    pub fn is_overdue(&self) -> bool {
        *self > Bucket::Current
    }
}

/// Result of classifying one reference timestamp.
///
/// `days` is `None` when the reference was unset or unparsable; such records
/// are deliberately classified as [`Bucket::Current`]: an invalid date must
/// never flag a part as overdue.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeClass {
    pub days: Option<i64>,
    pub bucket: Bucket,
}

impl AgeClass {
    fn unset() -> Self {
        Self {
            days: None,
            bucket: Bucket::Current,
        }
    }
}

/// Bucket thresholds on a floored whole-day count, first match wins.
///
/// The `>= 14` versus strict `> 30` / `> 90` asymmetry is the observed
/// behavior of the system this client talks to and is preserved verbatim.
pub fn classify_days(days: i64) -> Bucket {
    if days > 90 {
        Bucket::Over90
    } else if days > 30 {
        Bucket::Over30
    } else if days >= 14 {
        Bucket::Over14
    } else {
        Bucket::Current
    }
}

/// Classify a server-local `"YYYY-MM-DD HH:MM:SS"` reference timestamp
/// against `now`.
///
/// Both instants are truncated to UTC midnight before differencing, so the
/// day count is calendar-day granular, not elapsed-hours granular. Unset
/// input (`None`, blank, the `0000-00-00` sentinel) and unparsable input
/// classify as current; a reference in the future clamps to zero days.
pub fn classify(reference: Option<&str>, now: DateTime<Utc>) -> AgeClass {
    let Some(raw) = reference else {
        return AgeClass::unset();
    };
    let Some(ref_date) = parse_reference(raw) else {
        return AgeClass::unset();
    };

    let days = (now.date_naive() - ref_date).num_days();
    if days < 0 {
        return AgeClass {
            days: Some(0),
            bucket: Bucket::Current,
        };
    }

    AgeClass {
        days: Some(days),
        bucket: classify_days(days),
    }
}

fn parse_reference(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with("0000-00-00") {
        return None;
    }

    let parsed = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"));

    match parsed {
        Ok(date) => Some(date),
        Err(err) => {
            // Diagnostics only; malformed server dates are never surfaced.
            tracing::debug!(reference = trimmed, %err, "unparsable reference date, treating as unset");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2026-08-30T10:15:00Z".parse().unwrap()
    }

    fn days_ago(n: i64) -> String {
        (now() - Duration::days(n)).format("%Y-%m-%d %H:%M:%S").to_string()
    }

    #[test]
    fn boundary_exactness() {
        let cases = [
            (13, Bucket::Current),
            (14, Bucket::Over14),
            (30, Bucket::Over14),
            (31, Bucket::Over30),
            (90, Bucket::Over30),
            (91, Bucket::Over90),
        ];
        for (days, expected) in cases {
            let age = classify(Some(&days_ago(days)), now());
            assert_eq!(age.days, Some(days), "day count for {days} days ago");
            assert_eq!(age.bucket, expected, "bucket for {days} days ago");
        }
    }

    #[test]
    fn unset_and_garbage_classify_as_current() {
        let inputs = [
            None,
            Some(""),
            Some("   "),
            Some("0000-00-00 00:00:00"),
            Some("not-a-date"),
            Some("2026-13-45 99:99:99"),
        ];
        for input in inputs {
            let age = classify(input, now());
            assert_eq!(age, AgeClass { days: None, bucket: Bucket::Current }, "input {input:?}");
        }
    }

    #[test]
    fn future_reference_clamps_to_zero() {
        let tomorrow = days_ago(-1);
        let age = classify(Some(&tomorrow), now());
        assert_eq!(age.days, Some(0));
        assert_eq!(age.bucket, Bucket::Current);
    }

    #[test]
    fn date_only_reference_is_accepted() {
        let age = classify(Some("2026-05-01"), now());
        assert_eq!(age.days, Some(121));
        assert_eq!(age.bucket, Bucket::Over90);
    }

    #[test]
    fn day_count_is_calendar_granular_not_wallclock() {
        // A reference late yesterday evening is one day old this morning,
        // even though fewer than 24 hours elapsed.
        let age = classify(Some("2026-08-29 23:50:00"), now());
        assert_eq!(age.days, Some(1));
    }

    #[test]
    fn bucket_ordering_matches_severity() {
        assert!(Bucket::Current < Bucket::Over14);
        assert!(Bucket::Over14 < Bucket::Over30);
        assert!(Bucket::Over30 < Bucket::Over90);
        assert!(!Bucket::Current.is_overdue());
        assert!(Bucket::Over14.is_overdue());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: bucket severity never decreases as age grows.
            #[test]
            fn bucket_is_monotone_in_day_count(d1 in 0i64..400, d2 in 0i64..400) {
                let (lo, hi) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
                prop_assert!(classify_days(lo) <= classify_days(hi));
            }

            /// Property: classifying a formatted timestamp agrees with
            /// classifying its raw day count.
            #[test]
            fn classify_agrees_with_classify_days(days in 0i64..400) {
                let reference = (now() - Duration::days(days))
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string();
                let age = classify(Some(&reference), now());
                prop_assert_eq!(age.days, Some(days));
                prop_assert_eq!(age.bucket, classify_days(days));
            }
        }
    }
}
