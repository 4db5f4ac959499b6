use chrono::NaiveDateTime;
use thiserror::Error;

use crate::models::interval::TimeInterval;
use crate::models::resource::ResourceId;

/// Errors raised by the layout engine.
///
/// Only [`LayoutError::InvalidRange`] and [`LayoutError::Config`] abort a pass.
/// The per-event variants are collected as issues of the pass while layout
/// continues for the remaining events.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("event {event_id} starts after it ends ({start} > {end})")]
    InvalidInterval {
        event_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("event {event_id} references unknown resource '{resource_id}'")]
    UnresolvableResource {
        event_id: i64,
        resource_id: ResourceId,
    },

    #[error("drag candidate {requested:?} lies outside the grid, clamped to {clamped:?}")]
    GestureOutOfBounds {
        requested: TimeInterval,
        clamped: TimeInterval,
    },

    #[error("event {event_id} is not draggable")]
    NotDraggable { event_id: i64 },

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("invalid view range: {0}")]
    InvalidRange(String),

    #[error("invalid layout configuration: {0}")]
    Config(String),
}

impl LayoutError {
    /// True for errors that abort a whole layout pass.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LayoutError::InvalidRange(_) | LayoutError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(LayoutError::InvalidRange("empty".into()).is_fatal());
        assert!(LayoutError::Config("bad".into()).is_fatal());
        assert!(!LayoutError::NotDraggable { event_id: 1 }.is_fatal());
    }

    #[test]
    fn test_messages_name_the_event() {
        let err = LayoutError::UnresolvableResource {
            event_id: 7,
            resource_id: "z".into(),
        };
        assert_eq!(err.to_string(), "event 7 references unknown resource 'z'");
    }
}
