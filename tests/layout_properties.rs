// Property-based tests for the layout engine
// Random event sets on a single day, checked against invariants of the lane solver

mod fixtures;

use chrono::Duration;
use proptest::prelude::*;
use rust_calendar_layout::models::settings::DEFAULT_MIN_SLOT_MINUTES;
use rust_calendar_layout::{
    Event, LayoutConfig, LayoutEngine, ResourceSet, Segment, TimeInterval, ViewRange,
};

use fixtures::dates::{april, at};

fn engine(config: LayoutConfig) -> LayoutEngine {
    LayoutEngine::new(config, ResourceSet::default()).unwrap()
}

fn min_slot() -> Duration {
    Duration::minutes(DEFAULT_MIN_SLOT_MINUTES as i64)
}

fn visual(segment: &Segment) -> TimeInterval {
    segment.interval.with_min_duration(min_slot())
}

/// Events on April 4th from `(start minute, length in minutes)` pairs
fn day_events(specs: &[(u32, i64)]) -> Vec<Event> {
    specs
        .iter()
        .enumerate()
        .map(|(index, (minute, length))| {
            let start = at(4, minute / 60, minute % 60);
            let end = (start + Duration::minutes(*length)).min(at(5, 0, 0));
            Event::new(index as i64, format!("event {}", index), start, end).unwrap()
        })
        .collect()
}

/// Maximal sets of transitively overlapping visual intervals
fn clusters(intervals: &[TimeInterval]) -> Vec<Vec<usize>> {
    let mut order: Vec<usize> = (0..intervals.len()).collect();
    order.sort_by_key(|i| intervals[*i].start);

    let mut clusters: Vec<Vec<usize>> = Vec::new();
    let mut cluster_end = None;
    for i in order {
        match cluster_end {
            Some(end) if intervals[i].start < end => {
                clusters.last_mut().unwrap().push(i);
                cluster_end = Some(intervals[i].end.max(end));
            }
            _ => {
                clusters.push(vec![i]);
                cluster_end = Some(intervals[i].end);
            }
        }
    }
    clusters
}

/// Largest number of intervals active at one instant
fn max_concurrency(intervals: &[TimeInterval]) -> usize {
    intervals
        .iter()
        .map(|probe| intervals.iter().filter(|other| other.contains(probe.start)).count())
        .max()
        .unwrap_or(0)
}

fn event_specs() -> impl Strategy<Value = Vec<(u32, i64)>> {
    prop::collection::vec((0u32..1440, 0i64..240), 1..12)
}

proptest! {
    /// Property: overlapping events in the same column never share a lane
    #[test]
    fn prop_overlapping_events_use_distinct_lanes(specs in event_specs()) {
        let events = day_events(&specs);
        let pass = engine(LayoutConfig::by_day()).layout(&events, &ViewRange::consecutive(april(4), 1).unwrap());
        let segments: Vec<&Segment> = pass.timed_segments().collect();
        prop_assert_eq!(segments.len(), events.len());

        for (i, a) in segments.iter().enumerate() {
            for b in &segments[i + 1..] {
                if visual(a).overlaps(&visual(b)) {
                    prop_assert_ne!(a.lane, b.lane);
                }
            }
            prop_assert!(a.lane < a.total_lanes);
        }
    }

    /// Property: a cluster is exactly as wide as its busiest instant
    #[test]
    fn prop_total_lanes_is_max_concurrency(specs in event_specs()) {
        let events = day_events(&specs);
        let pass = engine(LayoutConfig::by_day()).layout(&events, &ViewRange::consecutive(april(4), 1).unwrap());
        let segments: Vec<&Segment> = pass.timed_segments().collect();
        let intervals: Vec<TimeInterval> = segments.iter().map(|s| visual(s)).collect();

        for cluster in clusters(&intervals) {
            let members: Vec<TimeInterval> = cluster.iter().map(|i| intervals[*i]).collect();
            let expected = max_concurrency(&members);
            for i in &cluster {
                prop_assert_eq!(segments[*i].total_lanes, expected);
            }
        }
    }

    /// Property: laying out the same input twice gives the same pass
    #[test]
    fn prop_layout_is_idempotent(specs in event_specs()) {
        let events = day_events(&specs);
        let range = ViewRange::consecutive(april(3), 3).unwrap();
        let engine = engine(LayoutConfig::by_day());
        prop_assert_eq!(engine.layout(&events, &range), engine.layout(&events, &range));
    }

    /// Property: per-day pieces of a multi-day event add up to the whole event
    #[test]
    fn prop_clipped_pieces_cover_event(
        start_minute in 0u32..1440,
        length in 1i64..(4 * 24 * 60),
    ) {
        let mut config = LayoutConfig::by_day();
        config.show_multi_day_times = true;
        let start = at(3, start_minute / 60, start_minute % 60);
        let event = Event::new(1, "Trip", start, start + Duration::minutes(length)).unwrap();
        let range = ViewRange::consecutive(april(3), 6).unwrap();

        let pass = engine(config).layout(std::slice::from_ref(&event), &range);
        let pieces: Vec<&Segment> = pass.segments_for(1).collect();

        let total = pieces
            .iter()
            .fold(Duration::zero(), |sum, piece| sum + piece.interval.duration());
        prop_assert_eq!(total, event.duration());
        prop_assert_eq!(pieces.first().unwrap().interval.start, event.start);
        prop_assert_eq!(pieces.last().unwrap().interval.end, event.end);
        prop_assert!(!pieces.first().unwrap().continues_before);
        prop_assert!(!pieces.last().unwrap().continues_after);
    }

    /// Property: zero-length events still get a drawable, in-day box
    #[test]
    fn prop_zero_length_events_are_visible(minute in 0u32..1440) {
        let events = day_events(&[(minute, 0)]);
        let pass = engine(LayoutConfig::by_day()).layout(&events, &ViewRange::consecutive(april(4), 1).unwrap());
        let segment = pass.segment(0).unwrap();

        prop_assert!(segment.time_span > 0.0);
        prop_assert!(segment.time_offset >= 0.0);
        prop_assert!(segment.time_offset + segment.time_span <= 1.0 + 1e-6);
    }
}
