//! Event grouping.
//!
//! Partitions an event set into [`DayGroup`]s: one per displayed day, and per
//! resource column when the view lays resources out side by side. Multi-day
//! events are clipped to each day they touch and annotated with continuation
//! flags; the caller's events are never modified.

use chrono::NaiveDate;

use crate::models::event::Event;
use crate::models::layout::{DayGroup, EventSlice, GroupKey, ResourceKey};
use crate::models::range::ViewRange;
use crate::models::resource::ResourceSet;
use crate::models::settings::{LayoutConfig, LayoutMode};
use crate::services::error::LayoutError;

/// Result of grouping one event set.
#[derive(Debug, Clone, Default)]
pub struct GroupedEvents {
    /// Groups in range order, then resource order, then the unassigned bucket.
    pub groups: Vec<DayGroup>,
    /// Events that could not be placed as given.
    pub issues: Vec<LayoutError>,
}

impl GroupedEvents {
    pub fn get(&self, key: &GroupKey) -> Option<&DayGroup> {
        self.groups.iter().find(|group| &group.key == key)
    }

    /// All-day memberships of `resource` on the days of `row`, paired with the
    /// day's index inside the row.
    pub fn all_day_memberships<'a>(
        &'a self,
        row: &'a [NaiveDate],
        resource: &'a ResourceKey,
    ) -> impl Iterator<Item = (usize, &'a EventSlice)> + 'a {
        self.groups
            .iter()
            .filter(move |group| &group.key.resource == resource)
            .filter_map(move |group| {
                row.iter()
                    .position(|date| *date == group.key.date)
                    .map(|index| (index, group))
            })
            .flat_map(|(index, group)| group.all_day.iter().map(move |slice| (index, slice)))
    }
}

/// Resource columns of one day, in display order.
pub fn resource_keys(config: &LayoutConfig, resources: &ResourceSet) -> Vec<ResourceKey> {
    match config.layout_mode {
        LayoutMode::ByDay => vec![ResourceKey::All],
        LayoutMode::ByResource => {
            let mut keys: Vec<ResourceKey> = resources
                .iter()
                .map(|resource| ResourceKey::Resource(resource.id.clone()))
                .collect();
            // Without any resource there is nothing to fan out into.
            if !config.fan_out_unassigned || keys.is_empty() {
                keys.push(ResourceKey::Unassigned);
            }
            keys
        }
    }
}

/// True if the event belongs to the fixed all-day row rather than the time grid.
pub fn is_all_day_row(event: &Event, config: &LayoutConfig) -> bool {
    event.all_day || (!config.show_multi_day_times && event.interval().spans_multiple_days())
}

/// Partition `events` into day (and resource) groups.
///
/// Invalid events and unknown resources are reported in
/// [`GroupedEvents::issues`]; they never abort grouping of the other events.
pub fn group(
    events: &[Event],
    range: &ViewRange,
    config: &LayoutConfig,
    resources: &ResourceSet,
) -> GroupedEvents {
    let keys = resource_keys(config, resources);
    let per_day = keys.len();

    let mut grouped = GroupedEvents::default();
    for date in range.dates() {
        for key in &keys {
            grouped
                .groups
                .push(DayGroup::new(GroupKey::new(*date, key.clone())));
        }
    }

    for (order, event) in events.iter().enumerate() {
        if let Err(err) = event.validate() {
            log::warn!("Skipping event in layout: {}", err);
            grouped.issues.push(err);
            continue;
        }

        let columns = match target_columns(event, config, resources, &keys) {
            Ok(columns) => columns,
            Err((err, columns)) => {
                log::warn!("{}; routing as unassigned", err);
                grouped.issues.push(err);
                columns
            }
        };
        if columns.is_empty() {
            continue;
        }

        let interval = event.interval();
        let first = interval.first_day();
        let last = interval.last_day();
        let all_day = is_all_day_row(event, config);

        for (day_index, date) in range.dates().iter().enumerate() {
            if *date < first {
                continue;
            }
            if *date > last {
                break;
            }
            let group_day = grouped.groups[day_index * per_day].day;
            let Some(clipped) = interval.clamp(&group_day) else {
                continue;
            };
            let slice = EventSlice {
                event: event.clone(),
                interval: clipped,
                continues_before: interval.start < group_day.start,
                continues_after: interval.end > group_day.end,
                order,
            };

            for column in &columns {
                let group = &mut grouped.groups[day_index * per_day + column];
                if all_day {
                    group.all_day.push(slice.clone());
                } else {
                    group.timed.push(slice.clone());
                }
            }
        }
    }

    for group in &mut grouped.groups {
        sort_slices(&mut group.timed);
        sort_slices(&mut group.all_day);
    }

    log::debug!(
        "Grouped {} events into {} groups ({} issues)",
        events.len(),
        grouped.groups.len(),
        grouped.issues.len()
    );
    grouped
}

fn sort_slices(slices: &mut [EventSlice]) {
    slices.sort_by(|a, b| a.interval.compare_start(&b.interval, || a.order.cmp(&b.order)));
}

/// Column indices (into `keys`) an event is placed in.
///
/// An unknown resource yields the routing of a resource-less event together
/// with the issue describing it.
fn target_columns(
    event: &Event,
    config: &LayoutConfig,
    resources: &ResourceSet,
    keys: &[ResourceKey],
) -> Result<Vec<usize>, (LayoutError, Vec<usize>)> {
    if config.layout_mode == LayoutMode::ByDay {
        return Ok(vec![0]);
    }

    match &event.resource_id {
        Some(id) => match resources.position(id) {
            Some(position) => Ok(vec![position]),
            None => Err((
                LayoutError::UnresolvableResource {
                    event_id: event.id,
                    resource_id: id.clone(),
                },
                unassigned_columns(keys),
            )),
        },
        None => Ok(unassigned_columns(keys)),
    }
}

fn unassigned_columns(keys: &[ResourceKey]) -> Vec<usize> {
    match keys.iter().position(|key| *key == ResourceKey::Unassigned) {
        Some(bucket) => vec![bucket],
        None => (0..keys.len()).collect(),
    }
}
