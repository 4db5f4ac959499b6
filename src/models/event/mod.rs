// Event module
// Caller-owned calendar events as seen by the layout engine

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::interval::TimeInterval;
use crate::models::resource::ResourceId;
use crate::services::error::LayoutError;

/// Calendar event with already-resolved instants.
///
/// The engine only reads events; identity (`id`) and stored interval are never
/// changed by a layout pass or a drag gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub resource_id: Option<ResourceId>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default = "default_draggable")]
    pub draggable: bool,
}

fn default_draggable() -> bool {
    true
}

impl Event {
    /// Create a new event with required fields
    ///
    /// # Arguments
    /// * `id` - Caller-assigned identifier
    /// * `title` - Event title
    /// * `start` - Event start instant
    /// * `end` - Event end instant (exclusive, may equal `start`)
    ///
    /// # Returns
    /// Returns `Err(LayoutError::InvalidInterval)` when `start` is after `end`.
    ///
    /// # Examples
    /// ```
    /// use rust_calendar_layout::models::event::Event;
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2015, 4, 4).unwrap().and_hms_opt(9, 0, 0).unwrap();
    /// let end = start + chrono::Duration::hours(1);
    /// let event = Event::new(1, "Team Meeting", start, end).unwrap();
    /// assert!(!event.all_day);
    /// ```
    pub fn new(
        id: i64,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, LayoutError> {
        let event = Self {
            id,
            title: title.into(),
            start,
            end,
            resource_id: None,
            all_day: false,
            draggable: true,
        };
        event.validate()?;
        Ok(event)
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Validate the event's interval
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.start > self.end {
            return Err(LayoutError::InvalidInterval {
                event_id: self.id,
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    pub fn interval(&self) -> TimeInterval {
        TimeInterval::new(self.start, self.end)
    }

    /// Get the duration of the event
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Copy of the event moved to `interval`. Used for previews and commits;
    /// the receiver is left untouched.
    pub fn with_interval(&self, interval: TimeInterval) -> Event {
        Event {
            start: interval.start,
            end: interval.end,
            ..self.clone()
        }
    }
}

/// Builder for creating events with optional fields
#[derive(Debug, Default)]
pub struct EventBuilder {
    id: Option<i64>,
    title: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    resource_id: Option<ResourceId>,
    all_day: bool,
    draggable: Option<bool>,
}

impl EventBuilder {
    /// Create a new event builder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Set both edges from an interval
    pub fn interval(self, interval: TimeInterval) -> Self {
        self.start(interval.start).end(interval.end)
    }

    pub fn resource(mut self, resource_id: impl Into<ResourceId>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    /// Set as all-day event
    pub fn all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = Some(draggable);
        self
    }

    /// Build the event. Title defaults to empty, id to 0.
    pub fn build(self) -> Result<Event, LayoutError> {
        let start = self
            .start
            .ok_or_else(|| LayoutError::MissingField("start"))?;
        let end = self.end.ok_or_else(|| LayoutError::MissingField("end"))?;

        let event = Event {
            id: self.id.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            start,
            end,
            resource_id: self.resource_id,
            all_day: self.all_day,
            draggable: self.draggable.unwrap_or(true),
        };

        event.validate()?;
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2015, 4, 4)
            .unwrap()
            .and_hms_opt(5, 30, 0)
            .unwrap()
    }

    fn sample_end() -> NaiveDateTime {
        sample_start() + Duration::hours(5)
    }

    #[test]
    fn test_new_event_success() {
        let event = Event::new(3, "A", sample_start(), sample_end()).unwrap();

        assert_eq!(event.id, 3);
        assert_eq!(event.title, "A");
        assert!(!event.all_day);
        assert!(event.draggable);
        assert!(event.resource_id.is_none());
    }

    #[test]
    fn test_new_event_invalid_times() {
        let result = Event::new(1, "Meeting", sample_end(), sample_start());

        assert!(matches!(
            result,
            Err(LayoutError::InvalidInterval { event_id: 1, .. })
        ));
    }

    #[test]
    fn test_new_event_equal_times_is_point_event() {
        let event = Event::new(1, "Reminder", sample_start(), sample_start()).unwrap();
        assert!(event.interval().is_zero_length());
    }

    #[test]
    fn test_builder_with_optional_fields() {
        let event = Event::builder()
            .id(5)
            .title("C")
            .start(sample_start())
            .end(sample_end())
            .resource("c")
            .all_day(true)
            .draggable(false)
            .build()
            .unwrap();

        assert_eq!(event.resource_id, Some(ResourceId::from("c")));
        assert!(event.all_day);
        assert!(!event.draggable);
    }

    #[test]
    fn test_builder_missing_start() {
        let result = Event::builder().title("Meeting").end(sample_end()).build();
        assert!(matches!(result, Err(LayoutError::MissingField("start"))));
    }

    #[test]
    fn test_with_interval_keeps_identity() {
        let event = Event::new(9, "Moved", sample_start(), sample_end()).unwrap();
        let moved = event.with_interval(event.interval().shifted(Duration::minutes(30)));

        assert_eq!(moved.id, 9);
        assert_eq!(moved.start, sample_start() + Duration::minutes(30));
        assert_eq!(event.start, sample_start());
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{"id":1,"title":"Rencontre","start":"2015-04-03T05:30:00","end":"2015-04-03T10:30:00","resource_id":"a"}"#;
        let event: Event = serde_json::from_str(json).unwrap();

        assert_eq!(event.resource_id, Some(ResourceId::from("a")));
        assert!(event.draggable);
        assert!(!event.all_day);
    }
}
