//! Core plumbing shared by the slider widget and its hosts.

pub mod event_bus;
pub mod slider_events;
