// Interval module
// Half-open time intervals and the pure operations the layout engine relies on

use std::cmp::Ordering;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A half-open `[start, end)` span of time.
///
/// Zero-length intervals are legal and represent point events. An interval
/// whose `start` is after its `end` can be constructed (events arrive from the
/// caller as-is) but is reported by [`TimeInterval::is_valid`] and rejected by
/// the grouper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeInterval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// The whole calendar day `[date 00:00, date+1 00:00)`.
    pub fn day(date: NaiveDate) -> Self {
        let start = date.and_time(NaiveTime::MIN);
        Self {
            start,
            end: start + Duration::days(1),
        }
    }

    /// Whole days `[first 00:00, last+1 00:00)`.
    pub fn days(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            start: first.and_time(NaiveTime::MIN),
            end: last.and_time(NaiveTime::MIN) + Duration::days(1),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    pub fn is_zero_length(&self) -> bool {
        self.start == self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// True iff the two intervals share at least one instant.
    ///
    /// Intervals that merely touch at a boundary do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True if `instant` lies inside the interval. A zero-length interval
    /// contains its own start.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        if self.is_zero_length() {
            return instant == self.start;
        }
        self.start <= instant && instant < self.end
    }

    /// Intersect with `bounds`, `None` if the two are disjoint.
    ///
    /// A zero-length interval survives when its instant lies inside the bounds.
    pub fn clamp(&self, bounds: &TimeInterval) -> Option<TimeInterval> {
        if self.is_zero_length() {
            return bounds.contains(self.start).then_some(*self);
        }
        let start = self.start.max(bounds.start);
        let end = self.end.min(bounds.end);
        (start < end).then(|| TimeInterval::new(start, end))
    }

    /// Ascending by start instant; `tie` decides between simultaneous starts.
    pub fn compare_start(
        &self,
        other: &TimeInterval,
        tie: impl FnOnce() -> Ordering,
    ) -> Ordering {
        self.start.cmp(&other.start).then_with(tie)
    }

    /// Calendar day holding the first instant.
    pub fn first_day(&self) -> NaiveDate {
        self.start.date()
    }

    /// Calendar day holding the last instant. The end is exclusive, so an
    /// interval ending exactly at midnight finishes on the previous day.
    pub fn last_day(&self) -> NaiveDate {
        if self.end > self.start && self.end.time() == NaiveTime::MIN {
            (self.end - Duration::days(1)).date()
        } else {
            self.end.date()
        }
    }

    /// True if the interval starts and ends on different calendar days.
    pub fn spans_multiple_days(&self) -> bool {
        self.first_day() != self.last_day()
    }

    /// Every calendar date the interval touches, in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let last = self.last_day();
        self.first_day().iter_days().take_while(move |d| *d <= last)
    }

    /// The interval as it is drawn: never shorter than `min`.
    pub fn with_min_duration(&self, min: Duration) -> TimeInterval {
        if self.duration() < min {
            TimeInterval::new(self.start, self.start + min)
        } else {
            *self
        }
    }

    /// Move both edges by `delta`.
    pub fn shifted(&self, delta: Duration) -> TimeInterval {
        TimeInterval::new(self.start + delta, self.end + delta)
    }
}

/// Free-function form of [`TimeInterval::overlaps`].
pub fn overlaps(a: &TimeInterval, b: &TimeInterval) -> bool {
    a.overlaps(b)
}

/// Free-function form of [`TimeInterval::clamp`].
pub fn clamp(interval: &TimeInterval, bounds: &TimeInterval) -> Option<TimeInterval> {
    interval.clamp(bounds)
}
