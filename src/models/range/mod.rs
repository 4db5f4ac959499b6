// View range module
// The ordered days a view displays

use chrono::NaiveDate;

use crate::models::interval::TimeInterval;
use crate::services::error::LayoutError;

/// Days shown by a view, strictly ascending. Gaps are allowed (a work week
/// skips the weekend).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRange {
    dates: Vec<NaiveDate>,
}

impl ViewRange {
    /// Build from an ordered list of days.
    ///
    /// An empty list or one that is not strictly ascending is a structural
    /// error for the whole pass.
    pub fn from_dates(dates: Vec<NaiveDate>) -> Result<Self, LayoutError> {
        if dates.is_empty() {
            return Err(LayoutError::InvalidRange("no days in range".to_string()));
        }
        if let Some(pair) = dates.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(LayoutError::InvalidRange(format!(
                "days must be strictly ascending, {} is followed by {}",
                pair[0], pair[1]
            )));
        }
        Ok(Self { dates })
    }

    /// `count` consecutive days starting at `first`.
    pub fn consecutive(first: NaiveDate, count: usize) -> Result<Self, LayoutError> {
        Self::from_dates(first.iter_days().take(count).collect())
    }

    /// Every day touched by `interval`.
    pub fn from_interval(interval: TimeInterval) -> Result<Self, LayoutError> {
        if !interval.is_valid() {
            return Err(LayoutError::InvalidRange(format!(
                "range starts after it ends ({} > {})",
                interval.start, interval.end
            )));
        }
        Self::from_dates(interval.dates().collect())
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn first(&self) -> NaiveDate {
        self.dates[0]
    }

    pub fn last(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.binary_search(&date).is_ok()
    }

    /// `[first 00:00, last+1 00:00)`
    pub fn bounds(&self) -> TimeInterval {
        TimeInterval::days(self.first(), self.last())
    }

    /// Split into consecutive rows of at most `per_row` days.
    pub fn rows(&self, per_row: Option<usize>) -> Vec<&[NaiveDate]> {
        let size = per_row.unwrap_or(self.dates.len()).max(1);
        self.dates.chunks(size).collect()
    }
}
