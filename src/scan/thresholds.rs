use anyhow::{bail, Result};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// The configured lead times, in days. Construction validates the entries;
/// after that membership is the only question anyone asks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertDaysSet(BTreeSet<i64>);

impl AlertDaysSet {
    /// Build the set from configured values. Duplicates collapse silently;
    /// a negative lead time or an empty list is a configuration error and
    /// fails here, before any scanning.
    pub fn new(days: impl IntoIterator<Item = i64>) -> Result<Self> {
        let mut set = BTreeSet::new();
        for d in days {
            if d < 0 {
                bail!("alert lead time must be non-negative, got {}", d);
            }
            set.insert(d);
        }
        if set.is_empty() {
            bail!("at least one alert lead time is required");
        }
        Ok(Self(set))
    }

    /// Exact membership, no tolerance window: an offset of 31 never matches
    /// {15, 30}. Negative offsets (overdue) never match since the set holds
    /// only non-negative values.
    pub fn matches(&self, offset: i64) -> bool {
        self.0.contains(&offset)
    }

    /// Human-readable form for email intros and logs, e.g. "15 or 30".
    pub fn describe(&self) -> String {
        self.0
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

/// Signed whole calendar days from `today` to `target`; positive when the
/// target is in the future. Both arguments are day-resolution already, so
/// the difference is exact.
pub fn days_between(target: NaiveDate, today: NaiveDate) -> i64 {
    target.signed_duration_since(today).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn days_between_is_signed_and_exact() {
        assert_eq!(days_between(today(), today()), 0);
        assert_eq!(days_between(today() + Duration::days(30), today()), 30);
        assert_eq!(days_between(today() - Duration::days(5), today()), -5);
    }

    #[test]
    fn membership_is_exact() {
        let set = AlertDaysSet::new([15, 30]).unwrap();
        assert!(set.matches(15));
        assert!(set.matches(30));
        assert!(!set.matches(31));
        assert!(!set.matches(29));
        assert!(!set.matches(-30));
    }

    #[test]
    fn duplicates_collapse() {
        let set = AlertDaysSet::new([30, 15, 30, 15]).unwrap();
        assert_eq!(set.describe(), "15 or 30");
    }

    #[test]
    fn negative_lead_time_is_rejected() {
        assert!(AlertDaysSet::new([15, -1]).is_err());
    }

    #[test]
    fn empty_set_is_rejected() {
        assert!(AlertDaysSet::new([]).is_err());
    }
}
