// Service module exports
// Grouping, lane solving and segment building, plus the drag mutator on top

pub mod drag;
pub mod engine;
pub mod error;
pub mod grouping;
pub mod header;
pub mod render;
pub mod segments;
pub mod solver;
