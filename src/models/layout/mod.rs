// Layout module
// Derived structures of a layout pass: groups, slots and segments

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::event::Event;
use crate::models::interval::TimeInterval;
use crate::models::resource::ResourceId;

/// Which resource column a group belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum ResourceKey {
    /// No resource partitioning (by-day layout).
    All,
    Resource(ResourceId),
    /// Bucket for resource-less events when fan-out is disabled.
    Unassigned,
}

impl ResourceKey {
    pub fn resource_id(&self) -> Option<&ResourceId> {
        match self {
            ResourceKey::Resource(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKey::All => f.write_str("*"),
            ResourceKey::Resource(id) => write!(f, "{}", id),
            ResourceKey::Unassigned => f.write_str("unassigned"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GroupKey {
    pub date: NaiveDate,
    pub resource: ResourceKey,
}

impl GroupKey {
    pub fn new(date: NaiveDate, resource: ResourceKey) -> Self {
        Self { date, resource }
    }
}

/// One event's membership in one group: the event clipped to the group's day.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSlice {
    pub event: Event,
    pub interval: TimeInterval,
    pub continues_before: bool,
    pub continues_after: bool,
    /// Position of the event in the caller's input, used as the final tie-breaker.
    pub order: usize,
}

/// The events of one calendar day (and resource).
///
/// Timed and all-day slices are kept apart; all-day slices never share lanes
/// with the time grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub key: GroupKey,
    pub day: TimeInterval,
    pub timed: Vec<EventSlice>,
    pub all_day: Vec<EventSlice>,
}

impl DayGroup {
    pub fn new(key: GroupKey) -> Self {
        let day = TimeInterval::day(key.date);
        Self {
            key,
            day,
            timed: Vec::new(),
            all_day: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.timed.is_empty() && self.all_day.is_empty()
    }
}

/// Lane assignment for one slice.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSlot {
    pub slice: EventSlice,
    pub lane: usize,
    pub total_lanes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentArea {
    /// Fixed-row area above the time grid.
    AllDay,
    /// Time grid column.
    Timed,
}

/// Positioned geometry for one event instance.
///
/// Fractions are relative to the owning column (timed) or row (all-day):
/// `offset`/`span` run along the lane axis, `time_offset`/`time_span` along
/// the time axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub event_id: i64,
    pub title: String,
    pub area: SegmentArea,
    /// Group the segment was laid out in. All-day segments carry the first
    /// date they cover.
    pub key: GroupKey,
    pub interval: TimeInterval,
    pub lane: usize,
    pub total_lanes: usize,
    pub offset: f32,
    pub span: f32,
    pub time_offset: f32,
    pub time_span: f32,
    pub continues_before: bool,
    pub continues_after: bool,
    pub draggable: bool,
    /// Live drag candidate rather than a stored event.
    pub preview: bool,
}

impl Segment {
    /// Right edge along the lane axis.
    pub fn end_offset(&self) -> f32 {
        self.offset + self.span
    }
}
