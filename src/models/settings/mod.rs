// Settings module
// Explicit layout configuration, loadable from TOML

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::services::error::LayoutError;

/// Default minimal slot, matching the 15 minute grid of the time views.
pub const DEFAULT_MIN_SLOT_MINUTES: u32 = 15;

/// How events are partitioned into groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// One group per date; resources are ignored.
    #[default]
    ByDay,
    /// One group per date and resource.
    ByResource,
}

/// Lane assignment policy inside a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayLayoutAlgorithm {
    /// Greedy lanes; a lane is reused as soon as its event has ended.
    #[default]
    Overlap,
    /// Every event of a cluster gets a lane of its own.
    NoOverlap,
}

/// Column arrangement of a resource time grid header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceHeader {
    /// Resource-major: every resource lists the range's days.
    #[default]
    Resource,
    /// Day-major: every day lists the resources.
    Day,
}

/// Layout configuration for one view.
///
/// `fan_out_unassigned` has no default: a TOML file that omits it is rejected,
/// and the programmatic constructors take it as an argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    pub layout_mode: LayoutMode,
    #[serde(default)]
    pub day_layout_algorithm: DayLayoutAlgorithm,
    /// Resource-less events go to every resource (true) or to a separate
    /// unassigned column (false).
    pub fan_out_unassigned: bool,
    #[serde(default = "default_min_slot_minutes")]
    pub min_slot_minutes: u32,
    #[serde(default)]
    pub resource_header: ResourceHeader,
    #[serde(default)]
    pub all_day_hidden: bool,
    /// Lay timed multi-day events out in the time grid instead of the all-day row.
    #[serde(default)]
    pub show_multi_day_times: bool,
    #[serde(default)]
    pub rtl: bool,
    /// Days per all-day row; `None` keeps the whole range in one row.
    #[serde(default)]
    pub days_per_row: Option<usize>,
    /// Draw items dragged in from outside as a preview box in the hovered cell.
    #[serde(default = "default_show_external_preview")]
    pub show_external_preview: bool,
}

fn default_min_slot_minutes() -> u32 {
    DEFAULT_MIN_SLOT_MINUTES
}

fn default_show_external_preview() -> bool {
    true
}

impl LayoutConfig {
    pub fn new(layout_mode: LayoutMode, fan_out_unassigned: bool) -> Self {
        Self {
            layout_mode,
            day_layout_algorithm: DayLayoutAlgorithm::default(),
            fan_out_unassigned,
            min_slot_minutes: DEFAULT_MIN_SLOT_MINUTES,
            resource_header: ResourceHeader::default(),
            all_day_hidden: false,
            show_multi_day_times: false,
            rtl: false,
            days_per_row: None,
            show_external_preview: true,
        }
    }

    /// Plain day/week view without resources
    pub fn by_day() -> Self {
        Self::new(LayoutMode::ByDay, false)
    }

    pub fn by_resource(fan_out_unassigned: bool) -> Self {
        Self::new(LayoutMode::ByResource, fan_out_unassigned)
    }

    pub fn with_algorithm(mut self, algorithm: DayLayoutAlgorithm) -> Self {
        self.day_layout_algorithm = algorithm;
        self
    }

    pub fn with_min_slot_minutes(mut self, minutes: u32) -> Self {
        self.min_slot_minutes = minutes;
        self
    }

    pub fn min_slot_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.min_slot_minutes))
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.min_slot_minutes == 0 || self.min_slot_minutes > 24 * 60 {
            return Err(LayoutError::Config(format!(
                "min_slot_minutes must be between 1 and 1440, got {}",
                self.min_slot_minutes
            )));
        }
        if self.days_per_row == Some(0) {
            return Err(LayoutError::Config(
                "days_per_row must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: LayoutConfig =
            toml::from_str(source).context("Failed to parse layout configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&source)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        log::debug!("Loaded layout configuration from {}", path.display());
        Ok(config)
    }
}
