//! Layout engine.
//!
//! Runs one layout pass: group the events, solve lanes per group and build
//! segments. Every pass starts from the caller's events; nothing is cached
//! between passes.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::models::event::Event;
use crate::models::interval::TimeInterval;
use crate::models::layout::{GroupKey, Segment, SegmentArea};
use crate::models::range::ViewRange;
use crate::models::resource::ResourceSet;
use crate::models::settings::LayoutConfig;
use crate::services::error::LayoutError;
use crate::services::grouping::{self, GroupedEvents};
use crate::services::header::{header_columns, HeaderColumn};
use crate::services::{segments, solver};

/// Output of one layout pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutPass {
    pub columns: Vec<HeaderColumn>,
    /// All-day segments first (row by row), then timed segments in group order.
    pub segments: Vec<Segment>,
    /// Events that were skipped or rerouted. Never fatal.
    pub issues: Vec<LayoutError>,
}

impl LayoutPass {
    pub fn all_day_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments
            .iter()
            .filter(|s| s.area == SegmentArea::AllDay)
    }

    pub fn timed_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.area == SegmentArea::Timed)
    }

    /// Timed segments of one group
    pub fn group_segments<'a>(&'a self, key: &'a GroupKey) -> impl Iterator<Item = &'a Segment> {
        self.timed_segments().filter(move |s| &s.key == key)
    }

    /// Every segment drawn for `event_id`
    pub fn segments_for(&self, event_id: i64) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(move |s| s.event_id == event_id)
    }

    /// First segment drawn for `event_id`
    pub fn segment(&self, event_id: i64) -> Option<&Segment> {
        self.segments_for(event_id).next()
    }
}

/// Computes layout passes for one view configuration.
///
/// The engine holds only immutable configuration, so one engine can serve
/// several views (or threads) at once.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    config: LayoutConfig,
    resources: ResourceSet,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig, resources: ResourceSet) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self { config, resources })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn resources(&self) -> &ResourceSet {
        &self.resources
    }

    /// Lay out every day of `range`.
    pub fn layout(&self, events: &[Event], range: &ViewRange) -> LayoutPass {
        let rows = range.rows(self.config.days_per_row);
        let grouped = grouping::group(events, range, &self.config, &self.resources);
        self.build(grouped, range, &rows, |_| true)
    }

    /// Lay out only the days touched by `touched`.
    ///
    /// Timed groups are recomputed for the touched days alone; all-day rows
    /// containing a touched day are recomputed whole. Untouched groups of the
    /// returned pass are absent, not empty. Header columns always cover the
    /// full range.
    pub fn layout_affected(
        &self,
        events: &[Event],
        range: &ViewRange,
        touched: &[TimeInterval],
    ) -> LayoutPass {
        let affected: BTreeSet<NaiveDate> = touched
            .iter()
            .filter(|interval| interval.is_valid())
            .flat_map(|interval| interval.dates())
            .filter(|date| range.contains(*date))
            .collect();

        let rows: Vec<&[NaiveDate]> = range
            .rows(self.config.days_per_row)
            .into_iter()
            .filter(|row| row.iter().any(|date| affected.contains(date)))
            .collect();
        let dates: Vec<NaiveDate> = rows.iter().flat_map(|row| row.iter().copied()).collect();

        let sub_range = match ViewRange::from_dates(dates) {
            Ok(sub_range) => sub_range,
            Err(_) => {
                log::debug!("Nothing to re-layout: touched intervals lie outside the range");
                return LayoutPass {
                    columns: header_columns(range, &self.config, &self.resources),
                    ..LayoutPass::default()
                };
            }
        };

        log::debug!("Re-laying out {} of {} days", affected.len(), range.len());
        let grouped = grouping::group(events, &sub_range, &self.config, &self.resources);
        let mut pass = self.build(grouped, &sub_range, &rows, |date| affected.contains(&date));
        pass.columns = header_columns(range, &self.config, &self.resources);
        pass
    }

    fn build(
        &self,
        grouped: GroupedEvents,
        range: &ViewRange,
        rows: &[&[NaiveDate]],
        include_timed: impl Fn(NaiveDate) -> bool,
    ) -> LayoutPass {
        let mut segments = Vec::new();

        if !self.config.all_day_hidden {
            let keys = grouping::resource_keys(&self.config, &self.resources);
            for row in rows {
                for key in &keys {
                    segments.extend(segments::all_day_row_segments(
                        row,
                        key,
                        grouped.all_day_memberships(row, key),
                        &self.config,
                    ));
                }
            }
        }

        let min_slot = self.config.min_slot_duration();
        for group in grouped.groups.iter().filter(|g| include_timed(g.key.date)) {
            let slots =
                solver::layout_slices(&group.timed, self.config.day_layout_algorithm, min_slot);
            segments.extend(segments::timed_segments(group, &slots, &self.config));
        }

        log::debug!(
            "Layout pass produced {} segments over {} days",
            segments.len(),
            range.len()
        );

        LayoutPass {
            columns: header_columns(range, &self.config, &self.resources),
            segments,
            issues: grouped.issues,
        }
    }
}
