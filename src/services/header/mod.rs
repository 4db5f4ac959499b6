//! Column arrangement of the time grid header.
//!
//! A resource view can be read resource-major (each resource lists the days
//! of the range) or day-major (each day lists the resources). The grouping is
//! the same either way; only the column order and which header rows are shown
//! differ.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::layout::{GroupKey, ResourceKey};
use crate::models::range::ViewRange;
use crate::models::resource::ResourceSet;
use crate::models::settings::{LayoutConfig, LayoutMode, ResourceHeader};
use crate::services::grouping::resource_keys;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderColumn {
    pub date: NaiveDate,
    pub resource: ResourceKey,
    /// Resource title, `None` outside resource views and for the unassigned column.
    pub label: Option<String>,
    /// Whether a date cell is drawn above the column.
    pub show_date: bool,
}

impl HeaderColumn {
    pub fn key(&self) -> GroupKey {
        GroupKey::new(self.date, self.resource.clone())
    }
}

/// Columns of the time grid, left to right.
pub fn header_columns(
    range: &ViewRange,
    config: &LayoutConfig,
    resources: &ResourceSet,
) -> Vec<HeaderColumn> {
    let keys = resource_keys(config, resources);
    let column = |date: NaiveDate, resource: &ResourceKey, show_date: bool| HeaderColumn {
        date,
        resource: resource.clone(),
        label: resource
            .resource_id()
            .and_then(|id| resources.get(id))
            .map(|r| r.title.clone()),
        show_date,
    };

    match (config.layout_mode, config.resource_header) {
        (LayoutMode::ByDay, _) => range
            .dates()
            .iter()
            .map(|date| column(*date, &ResourceKey::All, true))
            .collect(),
        (LayoutMode::ByResource, ResourceHeader::Resource) => {
            // A single day needs no date row under each resource.
            let show_date = range.len() > 1;
            keys.iter()
                .flat_map(|key| range.dates().iter().map(move |date| (*date, key)))
                .map(|(date, key)| column(date, key, show_date))
                .collect()
        }
        (LayoutMode::ByResource, ResourceHeader::Day) => range
            .dates()
            .iter()
            .flat_map(|date| keys.iter().map(move |key| (*date, key)))
            .map(|(date, key)| column(date, key, true))
            .collect(),
    }
}
