// Rust Calendar Layout Library
// Exports all modules for testing and reuse

pub mod cli;
pub mod models;
pub mod services;

pub use models::event::Event;
pub use models::interval::TimeInterval;
pub use models::layout::{GroupKey, ResourceKey, Segment, SegmentArea};
pub use models::range::ViewRange;
pub use models::resource::{Resource, ResourceId, ResourceSet};
pub use models::settings::{DayLayoutAlgorithm, LayoutConfig, LayoutMode, ResourceHeader};
pub use services::engine::{LayoutEngine, LayoutPass};
pub use services::error::LayoutError;
