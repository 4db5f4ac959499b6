//! Segment builder.
//!
//! Turns lane assignments into fractional geometry. Timed segments are placed
//! inside their day column; all-day segments span the days of one visible row.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::models::interval::TimeInterval;
use crate::models::layout::{
    DayGroup, EventSlice, GroupKey, LayoutSlot, ResourceKey, Segment, SegmentArea,
};
use crate::models::settings::LayoutConfig;
use crate::services::solver;

fn fraction(part: Duration, whole: Duration) -> f32 {
    let whole = whole.num_seconds();
    if whole <= 0 {
        return 0.0;
    }
    (part.num_seconds() as f64 / whole as f64) as f32
}

/// Lane-axis `(offset, span)` of lane `lane` out of `total` lanes.
fn lane_geometry(lane: usize, total: usize, rtl: bool) -> (f32, f32) {
    let total = total.max(1);
    let span = 1.0 / total as f32;
    let offset = lane as f32 * span;
    if rtl {
        ((1.0 - offset - span).max(0.0), span)
    } else {
        (offset, span)
    }
}

/// Build the segments of one group's timed slots.
///
/// The drawn height is at least one minimal slot and the box never leaves the
/// day: a short event at the very end of the day is pushed up instead.
pub fn timed_segments(group: &DayGroup, slots: &[LayoutSlot], config: &LayoutConfig) -> Vec<Segment> {
    let day = group.day;
    let day_length = day.duration();
    let min_slot = config.min_slot_duration().min(day_length);

    slots
        .iter()
        .map(|slot| {
            let slice = &slot.slice;
            let visual = slice.interval.with_min_duration(min_slot);
            let time_span = fraction(visual.duration(), day_length).min(1.0);
            let time_offset = fraction(visual.start - day.start, day_length)
                .clamp(0.0, 1.0 - time_span);
            let (offset, span) = lane_geometry(slot.lane, slot.total_lanes, config.rtl);

            Segment {
                event_id: slice.event.id,
                title: slice.event.title.clone(),
                area: SegmentArea::Timed,
                key: group.key.clone(),
                interval: slice.interval,
                lane: slot.lane,
                total_lanes: slot.total_lanes,
                offset,
                span,
                time_offset,
                time_span,
                continues_before: slice.continues_before,
                continues_after: slice.continues_after,
                draggable: slice.event.draggable,
                preview: false,
            }
        })
        .collect()
}

/// One event's extent inside an all-day row.
struct RowSpan<'a> {
    slice: &'a EventSlice,
    left: usize,
    right: usize,
}

/// Build the all-day segments of one visible row for one resource column.
///
/// `memberships` pairs each all-day slice with the index of its day in `row`;
/// the per-day memberships of a multi-day event are merged back into one
/// segment covering `left..=right`. Levels are assigned with the same solver
/// as the time grid, working on day indices.
pub fn all_day_row_segments<'a>(
    row: &[NaiveDate],
    resource: &ResourceKey,
    memberships: impl IntoIterator<Item = (usize, &'a EventSlice)>,
    config: &LayoutConfig,
) -> Vec<Segment> {
    if row.is_empty() {
        return Vec::new();
    }

    // Keyed by input order so merging is deterministic.
    let mut spans: BTreeMap<usize, RowSpan<'a>> = BTreeMap::new();
    for (index, slice) in memberships {
        spans
            .entry(slice.order)
            .and_modify(|span| {
                span.left = span.left.min(index);
                span.right = span.right.max(index);
            })
            .or_insert(RowSpan {
                slice,
                left: index,
                right: index,
            });
    }
    let spans: Vec<RowSpan<'a>> = spans.into_values().collect();

    let day_spans: Vec<(usize, usize)> = spans.iter().map(|s| (s.left, s.right + 1)).collect();
    let assignments = solver::assign_lanes(&day_spans, config.day_layout_algorithm);
    let levels = assignments
        .iter()
        .map(|a| a.lane + 1)
        .max()
        .unwrap_or(1);
    let row_length = row.len() as f32;

    let mut segments: Vec<Segment> = solver::sweep_order(&day_spans)
        .into_iter()
        .map(|index| {
            let span = &spans[index];
            let event = &span.slice.event;
            let event_interval = event.interval();
            let covered = TimeInterval::days(row[span.left], row[span.right]);
            let interval = event_interval.clamp(&covered).unwrap_or(span.slice.interval);

            let time_span = (span.right - span.left + 1) as f32 / row_length;
            let mut time_offset = span.left as f32 / row_length;
            if config.rtl {
                time_offset = (1.0 - time_offset - time_span).max(0.0);
            }
            let lane = assignments[index].lane;
            let (offset, lane_span) = lane_geometry(lane, levels, false);

            Segment {
                event_id: event.id,
                title: event.title.clone(),
                area: SegmentArea::AllDay,
                key: GroupKey::new(row[span.left], resource.clone()),
                interval,
                lane,
                total_lanes: levels,
                offset,
                span: lane_span,
                time_offset,
                time_span,
                continues_before: event_interval.first_day() < row[span.left],
                continues_after: event_interval.last_day() > row[span.right],
                draggable: event.draggable,
                preview: false,
            }
        })
        .collect();

    // Stable presentation order: by level, then left edge.
    segments.sort_by_key(|segment| (segment.lane, segment.key.date));
    segments
}
