// Module exports for models
// Caller-owned inputs (events, resources, range, config) and the derived layout structures

pub mod event;
pub mod interval;
pub mod layout;
pub mod range;
pub mod resource;
pub mod settings;
