//! Overlap layout solver.
//!
//! Assigns each event of a group a lane so that temporally overlapping events
//! never share one. The sweep is a greedy interval-graph colouring: events are
//! visited by start, a lane is freed once its event has ended and the lowest
//! free lane is taken. Clusters (maximal runs of transitively overlapping
//! events) are sized by the widest point of the sweep inside them.

use std::cmp::Ordering;

use chrono::Duration;

use crate::models::layout::{EventSlice, LayoutSlot};
use crate::models::settings::DayLayoutAlgorithm;

/// Lane assignment of one span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LaneAssignment {
    pub lane: usize,
    pub total_lanes: usize,
    /// Index of the cluster in sweep order.
    pub cluster: usize,
}

/// Visit order of the sweep: start ascending, then the longer span first
/// (same start, later end), then input position.
pub fn sweep_order<T: Ord>(spans: &[(T, T)]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..spans.len()).collect();
    order.sort_by(|&a, &b| compare_spans(&spans[a], a, &spans[b], b));
    order
}

fn compare_spans<T: Ord>(a: &(T, T), a_index: usize, b: &(T, T), b_index: usize) -> Ordering {
    a.0.cmp(&b.0)
        .then_with(|| b.1.cmp(&a.1))
        .then_with(|| a_index.cmp(&b_index))
}

/// Assign lanes to half-open `(start, end)` spans.
///
/// The result is indexed like `spans`. Spans are expected to be valid
/// (`start <= end`); callers filter invalid input beforehand.
pub fn assign_lanes<T: Ord + Copy>(
    spans: &[(T, T)],
    algorithm: DayLayoutAlgorithm,
) -> Vec<LaneAssignment> {
    sweep(spans, sweep_order(spans), algorithm)
}

fn sweep<T: Ord + Copy>(
    spans: &[(T, T)],
    order: Vec<usize>,
    algorithm: DayLayoutAlgorithm,
) -> Vec<LaneAssignment> {
    let mut result = vec![LaneAssignment::default(); spans.len()];

    // End of the span currently holding each lane, `None` when free.
    let mut lanes: Vec<Option<T>> = Vec::new();
    let mut members: Vec<usize> = Vec::new();
    let mut cluster_end: Option<T> = None;
    let mut cluster_width = 0;
    let mut cluster = 0;

    for index in order {
        let (start, end) = spans[index];

        if matches!(cluster_end, Some(current) if start >= current) {
            close_cluster(&mut result, &members, cluster_width);
            members.clear();
            lanes.clear();
            cluster_width = 0;
            cluster += 1;
        }

        let lane = match algorithm {
            DayLayoutAlgorithm::Overlap => {
                for held in lanes.iter_mut() {
                    if matches!(held, Some(held_end) if *held_end <= start) {
                        *held = None;
                    }
                }
                match lanes.iter().position(Option::is_none) {
                    Some(free) => free,
                    None => {
                        lanes.push(None);
                        lanes.len() - 1
                    }
                }
            }
            DayLayoutAlgorithm::NoOverlap => {
                lanes.push(None);
                lanes.len() - 1
            }
        };
        lanes[lane] = Some(end);

        cluster_end = Some(match cluster_end {
            Some(current) if current > end => current,
            _ => end,
        });
        cluster_width = cluster_width.max(lane + 1);
        result[index].lane = lane;
        result[index].cluster = cluster;
        members.push(index);
    }
    close_cluster(&mut result, &members, cluster_width);

    result
}

fn close_cluster(result: &mut [LaneAssignment], members: &[usize], width: usize) {
    for &member in members {
        result[member].total_lanes = width;
    }
}

/// Lay out the timed slices of one group.
///
/// Slices are solved on their drawn interval (at least `min_slot` long) so a
/// point event still reserves a slot. Slots come back in sweep order.
pub fn layout_slices(
    slices: &[EventSlice],
    algorithm: DayLayoutAlgorithm,
    min_slot: Duration,
) -> Vec<LayoutSlot> {
    let spans: Vec<_> = slices
        .iter()
        .map(|slice| {
            let visual = slice.interval.with_min_duration(min_slot);
            (visual.start, visual.end)
        })
        .collect();

    let order = sweep_order_with_tie(&spans, slices);
    let assignments = sweep(&spans, order.clone(), algorithm);

    order
        .into_iter()
        .map(|index| LayoutSlot {
            slice: slices[index].clone(),
            lane: assignments[index].lane,
            total_lanes: assignments[index].total_lanes,
        })
        .collect()
}

/// Sweep order that breaks full ties by the slices' input order rather than
/// their position in the group.
fn sweep_order_with_tie<T: Ord>(spans: &[(T, T)], slices: &[EventSlice]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..spans.len()).collect();
    order.sort_by(|&a, &b| {
        compare_spans(&spans[a], slices[a].order, &spans[b], slices[b].order)
    });
    order
}
