// Drag and resize gestures
//
// A gesture is an explicit value moved through its transitions:
// Idle -> Dragging -> (Dropped | Cancelled).
// The dragged event itself is never modified; the candidate lives in the
// gesture until the caller applies the drop.

use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::models::event::Event;
use crate::models::interval::TimeInterval;
use crate::models::layout::ResourceKey;
use crate::models::range::ViewRange;
use crate::models::resource::ResourceId;
use crate::models::settings::LayoutConfig;
use crate::services::engine::{LayoutEngine, LayoutPass};
use crate::services::error::LayoutError;

/// Event id carried by the preview of an item dragged in from outside.
pub const EXTERNAL_PREVIEW_ID: i64 = i64::MIN;

/// Which edge of the event is being resized
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeHandle {
    /// Top edge - adjusts start time
    Top,
    /// Bottom edge - adjusts end time
    Bottom,
    /// Left edge - adjusts start date (multi-day events)
    Left,
    /// Right edge - adjusts end date (multi-day events)
    Right,
}

impl ResizeHandle {
    /// Returns true if this handle adjusts time (vertical drag)
    pub fn is_vertical(&self) -> bool {
        matches!(self, ResizeHandle::Top | ResizeHandle::Bottom)
    }

    /// Returns true if this handle adjusts date (horizontal drag)
    pub fn is_horizontal(&self) -> bool {
        matches!(self, ResizeHandle::Left | ResizeHandle::Right)
    }

    fn moves_start(&self) -> bool {
        matches!(self, ResizeHandle::Top | ResizeHandle::Left)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    Move,
    Resize(ResizeHandle),
}

/// Something dragged in from outside the calendar.
#[derive(Clone, Debug, PartialEq)]
pub struct ExternalItem {
    pub title: String,
    pub duration: Duration,
    pub all_day: bool,
    /// Items that may be dragged over the grid but never dropped on it.
    pub droppable: bool,
}

impl ExternalItem {
    pub fn new(title: impl Into<String>, duration: Duration) -> Self {
        Self {
            title: title.into(),
            duration,
            all_day: false,
            droppable: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DragSubject {
    Existing(Event),
    External(ExternalItem),
}

/// Grid cell under the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct DropTarget {
    /// Column resource; `ResourceKey::All` keeps the subject's resource.
    pub resource: ResourceKey,
    pub all_day_slot: bool,
}

impl DropTarget {
    pub fn time_grid(resource: ResourceKey) -> Self {
        Self {
            resource,
            all_day_slot: false,
        }
    }

    pub fn all_day(resource: ResourceKey) -> Self {
        Self {
            resource,
            all_day_slot: true,
        }
    }
}

/// One pointer tick. `delta` is measured from where the gesture started, so
/// a late tick simply replaces the previous candidate.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerMove {
    pub delta: Duration,
    /// `None` while the pointer is outside every valid drop target.
    pub target: Option<DropTarget>,
}

/// Bounds and snapping unit of the grid a gesture runs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragGrid {
    pub bounds: TimeInterval,
    pub snap: Duration,
}

impl DragGrid {
    pub fn new(range: &ViewRange, config: &LayoutConfig) -> Self {
        Self {
            bounds: range.bounds(),
            snap: config.min_slot_duration(),
        }
    }

    /// Round `instant` to the nearest grid line of its day.
    fn snap_instant(&self, instant: NaiveDateTime) -> NaiveDateTime {
        let midnight = instant.date().and_time(NaiveTime::MIN);
        midnight + snap_duration(instant - midnight, self.snap)
    }

    /// Shift `interval` back inside the grid, keeping its length when it fits.
    fn clamp_move(&self, interval: TimeInterval) -> TimeInterval {
        let bounds = self.bounds;
        if interval.duration() >= bounds.duration() {
            return bounds;
        }
        if interval.start < bounds.start {
            interval.shifted(bounds.start - interval.start)
        } else if interval.end > bounds.end {
            interval.shifted(bounds.end - interval.end)
        } else {
            interval
        }
    }

    /// Pull resized edges inside the grid. The start is placed first so the
    /// end can still keep one snap unit whenever the grid is long enough.
    fn clamp_edges(&self, interval: TimeInterval) -> TimeInterval {
        let latest_start = (self.bounds.end - self.snap).max(self.bounds.start);
        let start = interval.start.clamp(self.bounds.start, latest_start);
        let end = interval.end.max(start + self.snap).min(self.bounds.end);
        TimeInterval::new(start, end)
    }
}

/// Whole-day cells covered by an all-day candidate: the start floored to
/// midnight and the length rounded up to at least one day.
pub fn all_day_span(interval: TimeInterval) -> TimeInterval {
    let start = interval.start.date().and_time(NaiveTime::MIN);
    let day_secs = Duration::days(1).num_seconds();
    let secs = interval.duration().num_seconds().max(1);
    let days = (secs + day_secs - 1) / day_secs;
    TimeInterval::new(start, start + Duration::days(days))
}

/// Round `delta` to the nearest multiple of `unit` (halves away from zero).
pub fn snap_duration(delta: Duration, unit: Duration) -> Duration {
    let unit_secs = unit.num_seconds();
    if unit_secs <= 0 {
        return delta;
    }
    let secs = delta.num_seconds();
    let steps = if secs >= 0 {
        (secs + unit_secs / 2) / unit_secs
    } else {
        -((-secs + unit_secs / 2) / unit_secs)
    };
    Duration::seconds(steps * unit_secs)
}

/// State of a gesture in progress.
#[derive(Clone, Debug, PartialEq)]
pub struct DragState {
    pub subject: DragSubject,
    pub kind: GestureKind,
    pub original: TimeInterval,
    pub grid: DragGrid,
    pub candidate: TimeInterval,
    pub candidate_resource: Option<ResourceId>,
    pub candidate_all_day: bool,
    /// Last hovered target, `None` when outside the grid.
    pub target: Option<DropTarget>,
    /// Set when the latest candidate had to be pulled back into the grid.
    pub out_of_bounds: Option<LayoutError>,
}

impl DragState {
    fn subject_resource(&self) -> Option<ResourceId> {
        match &self.subject {
            DragSubject::Existing(event) => event.resource_id.clone(),
            DragSubject::External(_) => None,
        }
    }

    fn subject_all_day(&self) -> bool {
        match &self.subject {
            DragSubject::Existing(event) => event.all_day,
            DragSubject::External(item) => item.all_day,
        }
    }

    /// The candidate as an event, with the id it is previewed under.
    pub fn candidate_event(&self) -> Event {
        let base = match &self.subject {
            DragSubject::Existing(event) => event.clone(),
            DragSubject::External(item) => Event {
                id: EXTERNAL_PREVIEW_ID,
                title: item.title.clone(),
                start: self.candidate.start,
                end: self.candidate.end,
                resource_id: None,
                all_day: item.all_day,
                draggable: true,
            },
        };
        Event {
            resource_id: self.candidate_resource.clone(),
            all_day: self.candidate_all_day,
            ..base.with_interval(self.candidate)
        }
    }

    fn update(&mut self, tick: PointerMove) {
        let all_day = self.subject_all_day()
            || tick.target.as_ref().map_or(false, |target| target.all_day_slot);

        let requested = match self.kind {
            GestureKind::Move => {
                if all_day {
                    let start = self.original.start + snap_duration(tick.delta, Duration::days(1));
                    all_day_span(TimeInterval::new(start, start + self.original.duration()))
                } else {
                    let start = self.grid.snap_instant(self.original.start + tick.delta);
                    TimeInterval::new(start, start + self.original.duration())
                }
            }
            GestureKind::Resize(handle) => self.resized(handle, tick.delta),
        };

        let clamped = match self.kind {
            GestureKind::Move => self.grid.clamp_move(requested),
            GestureKind::Resize(_) => self.grid.clamp_edges(requested),
        };
        self.out_of_bounds = (clamped != requested).then(|| {
            log::debug!("Drag candidate {:?} clamped to {:?}", requested, clamped);
            LayoutError::GestureOutOfBounds { requested, clamped }
        });
        self.candidate = clamped;

        if self.kind == GestureKind::Move {
            self.candidate_all_day = all_day;
            self.candidate_resource = match tick.target.as_ref().map(|t| &t.resource) {
                Some(ResourceKey::Resource(id)) => Some(id.clone()),
                Some(ResourceKey::Unassigned) => None,
                Some(ResourceKey::All) | None => self.subject_resource(),
            };
        }
        self.target = tick.target;
    }

    /// Move one edge, keeping at least one snap unit between the edges.
    /// Left/Right move by whole days.
    fn resized(&self, handle: ResizeHandle, delta: Duration) -> TimeInterval {
        let unit = if self.candidate_all_day {
            Duration::days(1)
        } else {
            self.grid.snap
        };
        let delta = if handle.is_horizontal() {
            snap_duration(delta, Duration::days(1))
        } else {
            delta
        };
        let original = self.original;

        if handle.moves_start() {
            let mut start = original.start + delta;
            if handle.is_vertical() {
                start = self.grid.snap_instant(start);
            }
            TimeInterval::new(start.min(original.end - unit), original.end)
        } else {
            let mut end = original.end + delta;
            if handle.is_vertical() {
                end = self.grid.snap_instant(end);
            }
            TimeInterval::new(original.start, end.max(original.start + unit))
        }
    }
}

/// Result of a completed drop, handed to whoever owns the events.
#[derive(Clone, Debug, PartialEq)]
pub struct DropCommit {
    pub subject: DragSubject,
    pub new_interval: TimeInterval,
    pub new_resource_id: Option<ResourceId>,
    pub all_day: bool,
}

impl DropCommit {
    /// The event as it should be stored. External items materialize here
    /// under `new_id`; existing events keep their id.
    pub fn to_event(&self, new_id: impl FnOnce() -> i64) -> Event {
        let base = match &self.subject {
            DragSubject::Existing(event) => event.clone(),
            DragSubject::External(item) => Event {
                id: new_id(),
                title: item.title.clone(),
                start: self.new_interval.start,
                end: self.new_interval.end,
                resource_id: None,
                all_day: item.all_day,
                draggable: true,
            },
        };
        Event {
            resource_id: self.new_resource_id.clone(),
            all_day: self.all_day,
            ..base.with_interval(self.new_interval)
        }
    }

    /// Apply the drop to a caller-owned collection: replace the moved event in
    /// place, or append a dropped external item under the next free id.
    pub fn apply(&self, events: &mut Vec<Event>) {
        match &self.subject {
            DragSubject::Existing(original) => {
                let updated = self.to_event(|| original.id);
                match events.iter_mut().find(|e| e.id == original.id) {
                    Some(slot) => *slot = updated,
                    None => events.push(updated),
                }
            }
            DragSubject::External(_) => {
                let next_id = events.iter().map(|e| e.id).max().map_or(1, |id| id + 1);
                events.push(self.to_event(|| next_id));
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging(DragState),
    Dropped(DropCommit),
    Cancelled,
}

impl Gesture {
    /// Start moving an existing event.
    pub fn begin_move(event: &Event, grid: DragGrid) -> Result<Gesture, LayoutError> {
        Self::begin_existing(event, GestureKind::Move, grid)
    }

    /// Start resizing an existing event by one of its edges.
    pub fn begin_resize(
        event: &Event,
        handle: ResizeHandle,
        grid: DragGrid,
    ) -> Result<Gesture, LayoutError> {
        Self::begin_existing(event, GestureKind::Resize(handle), grid)
    }

    fn begin_existing(event: &Event, kind: GestureKind, grid: DragGrid) -> Result<Gesture, LayoutError> {
        if !event.draggable {
            return Err(LayoutError::NotDraggable { event_id: event.id });
        }
        event.validate()?;
        log::debug!("Begin {:?} of event {}", kind, event.id);

        let target = DropTarget {
            resource: match &event.resource_id {
                Some(id) => ResourceKey::Resource(id.clone()),
                None => ResourceKey::All,
            },
            all_day_slot: event.all_day,
        };
        Ok(Gesture::Dragging(DragState {
            subject: DragSubject::Existing(event.clone()),
            kind,
            original: event.interval(),
            grid,
            candidate: event.interval(),
            candidate_resource: event.resource_id.clone(),
            candidate_all_day: event.all_day,
            target: Some(target),
            out_of_bounds: None,
        }))
    }

    /// Start dragging an item from outside the calendar. `anchor` is the grid
    /// instant under the pointer when it entered the grid.
    pub fn begin_external(item: ExternalItem, anchor: NaiveDateTime, grid: DragGrid) -> Gesture {
        let start = grid.snap_instant(anchor);
        let mut original = TimeInterval::new(start, start + item.duration.max(Duration::zero()));
        if item.all_day {
            original = all_day_span(original);
        }
        log::debug!("Begin external drag of '{}'", item.title);

        let candidate_all_day = item.all_day;
        Gesture::Dragging(DragState {
            subject: DragSubject::External(item),
            kind: GestureKind::Move,
            original,
            grid,
            candidate: grid.clamp_move(original),
            candidate_resource: None,
            candidate_all_day,
            target: None,
            out_of_bounds: None,
        })
    }

    /// Feed one pointer tick. Gestures that are not dragging ignore it.
    pub fn pointer_move(self, tick: PointerMove) -> Gesture {
        match self {
            Gesture::Dragging(mut state) => {
                state.update(tick);
                Gesture::Dragging(state)
            }
            other => other,
        }
    }

    /// Release the pointer over the last hovered target.
    pub fn drop(self) -> Gesture {
        let state = match self {
            Gesture::Dragging(state) => state,
            other => return other,
        };

        if state.target.is_none() {
            log::debug!("Drop outside the grid, gesture cancelled");
            return Gesture::Cancelled;
        }
        if let DragSubject::External(item) = &state.subject {
            if !item.droppable {
                log::debug!("'{}' cannot be dropped on the calendar", item.title);
                return Gesture::Cancelled;
            }
        }

        Gesture::Dropped(DropCommit {
            new_interval: state.candidate,
            new_resource_id: state.candidate_resource,
            all_day: state.candidate_all_day,
            subject: state.subject,
        })
    }

    pub fn cancel(self) -> Gesture {
        match self {
            Gesture::Dragging(_) => Gesture::Cancelled,
            other => other,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Gesture::Dragging(_))
    }

    pub fn state(&self) -> Option<&DragState> {
        match self {
            Gesture::Dragging(state) => Some(state),
            _ => None,
        }
    }

    pub fn commit(&self) -> Option<&DropCommit> {
        match self {
            Gesture::Dropped(commit) => Some(commit),
            _ => None,
        }
    }

    /// Lay out the days touched by the gesture with the candidate in place of
    /// the dragged event. Candidate segments are flagged `preview`.
    pub fn preview(
        &self,
        events: &[Event],
        range: &ViewRange,
        engine: &LayoutEngine,
    ) -> Option<LayoutPass> {
        let state = self.state()?;
        let candidate = state.candidate_event();

        let mut preview_events: Vec<Event> = events
            .iter()
            .map(|event| {
                if event.id == candidate.id {
                    candidate.clone()
                } else {
                    event.clone()
                }
            })
            .collect();
        let mut touched = vec![state.candidate];
        match &state.subject {
            DragSubject::Existing(_) => touched.push(state.original),
            DragSubject::External(_) if engine.config().show_external_preview => {
                preview_events.push(candidate.clone())
            }
            DragSubject::External(_) => {}
        }

        let mut pass = engine.layout_affected(&preview_events, range, &touched);
        for segment in pass.segments.iter_mut().filter(|s| s.event_id == candidate.id) {
            segment.preview = true;
        }
        Some(pass)
    }
}
