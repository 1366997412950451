use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive on both ends. An open end places no constraint on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Records without a date never fall inside a bounded range.
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(date) = date else {
            return false;
        };
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn bounds_are_inclusive() {
        let range = DateRange::new(Some(day(5)), Some(day(10)));
        assert!(range.contains(Some(day(5))));
        assert!(range.contains(Some(day(10))));
        assert!(!range.contains(Some(day(4))));
        assert!(!range.contains(Some(day(11))));
    }

    #[test]
    fn open_ends_and_missing_dates() {
        assert!(DateRange::default().contains(None));
        let since = DateRange::new(Some(day(5)), None);
        assert!(since.contains(Some(day(28))));
        assert!(!since.contains(None));
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let range = DateRange::new(Some(day(10)), Some(day(5)));
        assert!(!range.contains(Some(day(7))));
    }
}
